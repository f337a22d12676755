//! Workflow definition input handling

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A workflow definition ready to submit, either on disk or in memory
///
/// The scheduler receives the document as an opaque XML blob; the SDK
/// never parses or validates it. Call sites choose the variant
/// explicitly, or use [`WorkflowXml::detect`] to keep the historical
/// "path if it exists, literal XML otherwise" coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowXml {
    /// Path to an XML document on disk
    File(PathBuf),
    /// An XML document already held in memory
    Inline(String),
}

impl WorkflowXml {
    /// Coerces a string that may name a file on disk
    ///
    /// An existing path wins; anything else is taken as literal XML. Note
    /// that this probes the filesystem — prefer constructing the variant
    /// directly when the input's nature is known.
    pub fn detect(input: impl AsRef<str>) -> Self {
        let input = input.as_ref();
        if Path::new(input).exists() {
            WorkflowXml::File(PathBuf::from(input))
        } else {
            WorkflowXml::Inline(input.to_owned())
        }
    }

    /// Materializes the document into a request body.
    pub(crate) async fn into_body(self) -> Result<String> {
        match self {
            WorkflowXml::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            WorkflowXml::Inline(xml) => Ok(xml),
        }
    }
}

impl From<String> for WorkflowXml {
    fn from(xml: String) -> Self {
        WorkflowXml::Inline(xml)
    }
}

impl From<&str> for WorkflowXml {
    fn from(xml: &str) -> Self {
        WorkflowXml::Inline(xml.to_owned())
    }
}

impl From<PathBuf> for WorkflowXml {
    fn from(path: PathBuf) -> Self {
        WorkflowXml::File(path)
    }
}

impl From<&Path> for WorkflowXml {
    fn from(path: &Path) -> Self {
        WorkflowXml::File(path.to_path_buf())
    }
}
