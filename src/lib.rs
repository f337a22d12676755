//! # Oozie Rust SDK
//!
//! This crate provides a Rust client for the Apache Oozie workflow
//! scheduler's Web Services API: submit workflow definitions, start,
//! suspend and resume jobs, and inspect their status and errors.
//!
//! ## Features
//!
//! - **Stateless client**: an immutable base URL over a shared connection
//!   pool, safe to clone across concurrent tasks
//! - **Uniform validation**: every response is checked for the expected
//!   status code and required fields before a result is extracted
//! - **Two-kind errors**: failures are classified as the caller's fault
//!   or the scheduler's, with full diagnostic context attached
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oozie_rust_sdk::{Client, WorkflowXml};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://localhost:11000/oozie")?;
//!
//!     client.healthcheck().await?;
//!
//!     let job_id = client.submit(WorkflowXml::detect("workflow.xml")).await?;
//!     client.run(&job_id).await?;
//!
//!     println!("Job {} is {}", job_id, client.status(&job_id).await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! The base URL can also come from the `OOZIE_URL` environment variable
//! via [`Client::from_env`]; construction fails before any network
//! activity when neither is available.

pub mod client;
pub mod error;
pub mod workflow;

pub use client::Client;
pub use error::{Fault, Result, SdkError};
pub use workflow::WorkflowXml;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::error::{Fault, Result, SdkError};
    pub use crate::workflow::WorkflowXml;
    pub use serde_json::{Map, Value};
}
