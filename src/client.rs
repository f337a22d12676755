//! Oozie Web Services API client implementation

use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Fault, Result, SdkError};
use crate::workflow::WorkflowXml;

/// Version segment of the Oozie Web Services API
pub const API_VERSION: &str = "v1";

/// Environment variable consulted by [`Client::from_env`]
pub const URL_ENV_VAR: &str = "OOZIE_URL";

/// System mode reported by a healthy scheduler
const NORMAL_MODE: &str = "NORMAL";

/// Client for the Oozie workflow scheduler Web Services API
///
/// The client is stateless beyond its immutable base URL and the shared
/// HTTP connection pool, so a single instance (or clones of it) can be
/// used freely across concurrent tasks. Every method performs exactly one
/// request/response cycle; there are no retries and no client-side
/// timeout policy.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    http_client: HttpClient,
}

/// Response to `GET admin/status`
#[derive(Deserialize, Debug)]
struct SystemStatus {
    #[serde(rename = "systemMode")]
    system_mode: String,
}

/// Response to `GET jobs`
#[derive(Deserialize, Debug)]
struct JobList {
    workflows: Vec<JobSummary>,
}

#[derive(Deserialize, Debug)]
struct JobSummary {
    id: String,
}

/// Response to `POST jobs`
#[derive(Deserialize, Debug)]
struct Submitted {
    id: String,
}

/// Status field of `GET job/{id}`
#[derive(Deserialize, Debug)]
struct JobStatus {
    status: String,
}

/// Actions field of `GET job/{id}`
#[derive(Deserialize, Debug)]
struct JobActions {
    actions: Vec<JobAction>,
}

#[derive(Deserialize, Debug)]
struct JobAction {
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// A response whose status code already matched the expected one
struct Validated {
    url: String,
    status: StatusCode,
    body: String,
}

impl Validated {
    /// Decodes the body into the operation's wire shape.
    ///
    /// An unparseable body or a missing required field is the scheduler
    /// breaking its contract, so both map to a server-side fault.
    fn decode<T: DeserializeOwned>(&self, action: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|_| self.malformed(action))
    }

    fn malformed(&self, action: &str) -> SdkError {
        SdkError::Server(Fault::new(
            "Malformed response",
            action,
            self.url.as_str(),
            self.status.as_u16(),
            self.body.as_str(),
        ))
    }
}

/// Checks the response status against the expected code.
///
/// 401 and other 4xx codes are the caller's fault, worded distinctly;
/// anything else unexpected is the server's.
async fn expect_status(response: Response, expected: StatusCode, action: &str) -> Result<Validated> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;
    if status == expected {
        return Ok(Validated { url, status, body });
    }
    let fault = |reason: &str| Fault::new(reason, action, url.as_str(), status.as_u16(), body.as_str());
    Err(if status == StatusCode::UNAUTHORIZED {
        SdkError::Client(fault("Permission denied"))
    } else if status.is_client_error() {
        SdkError::Client(fault("Malformed input"))
    } else {
        SdkError::Server(fault("Unexpected status code"))
    })
}

impl Client {
    /// Creates a new client for the scheduler at `base_url`
    ///
    /// A single trailing `/` is stripped, so `http://host:11000/oozie/`
    /// and `http://host:11000/oozie` configure the identical client. The
    /// URL must parse; nothing else about it is validated and no network
    /// activity happens until the first operation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oozie_rust_sdk::Client;
    ///
    /// let client = Client::new("http://localhost:11000/oozie").unwrap();
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_http_client(base_url, HttpClient::new())
    }

    /// Creates a client on top of a caller-configured transport
    ///
    /// Timeouts, proxies and TLS settings all belong to the supplied
    /// `reqwest::Client`; the SDK imposes no policy of its own.
    pub fn with_http_client(base_url: impl Into<String>, http_client: HttpClient) -> Result<Self> {
        let raw = base_url.into();
        let base_url = raw.strip_suffix('/').unwrap_or(&raw).to_string();
        Url::parse(&base_url)?;
        Ok(Self { base_url, http_client })
    }

    /// Creates a client from the `OOZIE_URL` environment variable
    ///
    /// Fails with a configuration error, before any network activity,
    /// when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(URL_ENV_VAR) {
            Ok(url) => Self::new(url),
            Err(_) => Err(SdkError::Config(format!(
                "no Oozie URL provided and none set in environment {URL_ENV_VAR}"
            ))),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path)
    }

    /// Checks that the scheduler is reachable and in NORMAL mode
    ///
    /// Any other reported system mode fails with a server error carrying
    /// the mode string, even when the HTTP exchange itself succeeded.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use oozie_rust_sdk::Client;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("http://localhost:11000/oozie")?;
    /// client.healthcheck().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn healthcheck(&self) -> Result<()> {
        let action = "performing healthcheck";
        let url = self.endpoint("admin/status");
        let response = self.http_client.get(&url).send().await?;
        let validated = expect_status(response, StatusCode::OK, action).await?;
        let system: SystemStatus = validated.decode(action)?;
        if system.system_mode != NORMAL_MODE {
            return Err(SdkError::Server(Fault::new(
                format!("Oozie server reports {}", system.system_mode),
                action,
                validated.url.as_str(),
                validated.status.as_u16(),
                validated.body.as_str(),
            )));
        }
        info!("Oozie installation at {} appears operational", self.base_url);
        Ok(())
    }

    /// Retrieves the scheduler's configuration as a raw mapping
    pub async fn configuration(&self) -> Result<Map<String, Value>> {
        let action = "retrieving Oozie configuration";
        let url = self.endpoint("admin/configuration");
        let response = self.http_client.get(&url).send().await?;
        let validated = expect_status(response, StatusCode::OK, action).await?;
        validated.decode(action)
    }

    /// Lists the identifiers of known workflow jobs, in server order
    pub async fn list_jobs(&self) -> Result<Vec<String>> {
        let action = "listing jobs";
        let url = self.endpoint("jobs");
        let response = self.http_client.get(&url).send().await?;
        let validated = expect_status(response, StatusCode::OK, action).await?;
        let list: JobList = validated.decode(action)?;
        Ok(list.workflows.into_iter().map(|wf| wf.id).collect())
    }

    /// Submits a workflow definition and returns the new job identifier
    ///
    /// The XML document is sent as an opaque blob; malformed XML is only
    /// detected by the scheduler, which rejects it like any other bad
    /// input.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use oozie_rust_sdk::{Client, WorkflowXml};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new("http://localhost:11000/oozie")?;
    /// let job_id = client.submit(WorkflowXml::detect("workflow.xml")).await?;
    /// println!("Submitted job {}", job_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(&self, workflow: impl Into<WorkflowXml>) -> Result<String> {
        let action = "submitting job";
        let body = workflow.into().into_body().await?;
        let url = self.endpoint("jobs");
        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await?;
        let validated = expect_status(response, StatusCode::CREATED, action).await?;
        let submitted: Submitted = validated.decode(action)?;
        debug!("submitted job {}", submitted.id);
        Ok(submitted.id)
    }

    /// Starts a submitted job
    pub async fn run(&self, job_id: &str) -> Result<()> {
        self.job_action(job_id, "start", "running job").await
    }

    /// Suspends a running job
    pub async fn suspend(&self, job_id: &str) -> Result<()> {
        self.job_action(job_id, "suspend", "suspending job").await
    }

    /// Resumes a suspended job
    pub async fn resume(&self, job_id: &str) -> Result<()> {
        self.job_action(job_id, "resume", "resuming job").await
    }

    async fn job_action(&self, job_id: &str, verb: &str, action: &str) -> Result<()> {
        let url = self.endpoint(&format!("job/{job_id}"));
        let response = self
            .http_client
            .put(&url)
            .query(&[("action", verb)])
            .send()
            .await?;
        expect_status(response, StatusCode::OK, action).await?;
        debug!("{} {}", action, job_id);
        Ok(())
    }

    /// Retrieves the current status string of a job
    ///
    /// The returned value (RUNNING, SUSPENDED, SUCCEEDED, ...) is
    /// server-defined and passed through uninterpreted.
    pub async fn status(&self, job_id: &str) -> Result<String> {
        let action = "querying job status";
        let url = self.endpoint(&format!("job/{job_id}"));
        let response = self.http_client.get(&url).send().await?;
        let validated = expect_status(response, StatusCode::OK, action).await?;
        let job: JobStatus = validated.decode(action)?;
        Ok(job.status)
    }

    /// Retrieves the first error message recorded against a job
    ///
    /// Scans the job's actions in server order and returns the first
    /// non-null `errorMessage`, or `None` when no action carries one.
    pub async fn error(&self, job_id: &str) -> Result<Option<String>> {
        let action = "listing job errors";
        let url = self.endpoint(&format!("job/{job_id}"));
        let response = self.http_client.get(&url).send().await?;
        let validated = expect_status(response, StatusCode::OK, action).await?;
        let job: JobActions = validated.decode(action)?;
        Ok(job.actions.into_iter().find_map(|a| a.error_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_strips_one_trailing_slash() {
        let stripped = Client::new("http://localhost:11000/oozie/").unwrap();
        let bare = Client::new("http://localhost:11000/oozie").unwrap();
        assert_eq!(stripped.base_url, bare.base_url);
        // exactly one separator is stripped, never more
        let doubled = Client::new("http://localhost:11000/oozie//").unwrap();
        assert_eq!(doubled.base_url, "http://localhost:11000/oozie/");
    }

    #[test]
    fn test_endpoint_building() {
        let client = Client::new("http://localhost:11000/oozie").unwrap();
        assert_eq!(
            client.endpoint("admin/status"),
            "http://localhost:11000/oozie/v1/admin/status"
        );
        assert_eq!(
            client.endpoint("job/0000001-wf"),
            "http://localhost:11000/oozie/v1/job/0000001-wf"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Client::new("not a url").unwrap_err();
        assert!(matches!(err, SdkError::UrlParse(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_from_env() {
        std::env::remove_var(URL_ENV_VAR);
        let err = Client::from_env().unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
        assert!(err.is_client_error());

        std::env::set_var(URL_ENV_VAR, "http://localhost:11000/oozie/");
        let client = Client::from_env().unwrap();
        assert_eq!(client.base_url, "http://localhost:11000/oozie");
        std::env::remove_var(URL_ENV_VAR);
    }

    #[test]
    fn test_job_list_deserialization() {
        let json_str = r#"{
            "workflows": [
                {"id": "0000001-wf", "status": "RUNNING", "user": "hadoop"},
                {"id": "0000002-wf", "status": "KILLED"}
            ]
        }"#;

        let list: JobList = serde_json::from_str(json_str).unwrap();
        let ids: Vec<String> = list.workflows.into_iter().map(|wf| wf.id).collect();
        assert_eq!(ids, vec!["0000001-wf", "0000002-wf"]);
    }

    #[test]
    fn test_job_actions_deserialization() {
        let json_str = r#"{
            "status": "KILLED",
            "actions": [
                {"errorMessage": null, "name": "start"},
                {"errorMessage": "Main class threw exception", "name": "mr-node"}
            ]
        }"#;

        let job: JobActions = serde_json::from_str(json_str).unwrap();
        let first = job.actions.into_iter().find_map(|a| a.error_message);
        assert_eq!(first.as_deref(), Some("Main class threw exception"));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let validated = Validated {
            url: "http://localhost:11000/oozie/v1/jobs".to_string(),
            status: StatusCode::OK,
            body: r#"{"totalJobs": 0}"#.to_string(),
        };
        let err = validated.decode::<JobList>("listing jobs").unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("Malformed response"));
    }
}
