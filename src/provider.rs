//! Provider and attribute data types.

use std::fmt;

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudProvider {
    /// Google Cloud Platform
    Gcp,
    /// Amazon Web Services
    Aws,
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudProvider::Gcp => write!(f, "GCP"),
            CloudProvider::Aws => write!(f, "AWS"),
        }
    }
}

/// A header sent with every request to a provider's metadata service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub name: &'static str,
    pub value: &'static str,
}

/// One remote metadata key and the file it is written to.
///
/// `file` is relative to the configuration root and `mode` holds the
/// permission bits the file is created with (e.g. `0o600`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub file: String,
    pub mode: u32,
}

impl Attribute {
    pub fn new(key: impl Into<String>, file: impl Into<String>, mode: u32) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
            mode,
        }
    }
}

/// Declarative description of one metadata service.
#[derive(Debug, Clone)]
pub struct Provider {
    pub kind: CloudProvider,
    /// Path appended to the metadata root, ending in `/`.
    pub path: &'static str,
    pub headers: &'static [Header],
    pub attributes: Vec<Attribute>,
    /// Environment variables starting with this prefix may declare extra attributes.
    pub env_prefix: &'static str,
}

impl Provider {
    /// Base URL that attribute keys are appended to.
    pub fn base_url(&self, metadata_url: &str) -> String {
        format!("{}{}", metadata_url.trim_end_matches('/'), self.path)
    }
}
