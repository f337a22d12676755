//! Submit example: sends a workflow definition and starts the job

use oozie_rust_sdk::{Client, WorkflowXml};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let input = std::env::args()
        .nth(1)
        .ok_or("usage: submit <workflow.xml or XML string>")?;

    let client = Client::from_env()?;

    // An existing path is read from disk, anything else is sent verbatim
    let job_id = client.submit(WorkflowXml::detect(&input)).await?;
    println!("Submitted job {}", job_id);

    client.run(&job_id).await?;
    println!("Job {} is {}", job_id, client.status(&job_id).await?);

    Ok(())
}
