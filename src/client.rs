//! HTTP client wrapper for metadata requests.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::info;

use crate::error::MetadataError;
use crate::provider::Header;

/// Total timeout for one metadata request, connection included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Default metadata service root (link-local address).
pub const DEFAULT_METADATA_URL: &str = "http://169.254.169.254";

/// HTTP client wrapper for metadata service requests.
///
/// One client is shared by every fetch of a run so connections are reused.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
}

impl MetadataClient {
    /// Create a new metadata client with the specified timeout.
    pub fn new(timeout: Duration) -> Result<Self, MetadataError> {
        let inner = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MetadataError::Client)?;
        Ok(Self { inner })
    }

    /// Create a new metadata client with [`FETCH_TIMEOUT`].
    pub fn with_default_timeout() -> Result<Self, MetadataError> {
        Self::new(FETCH_TIMEOUT)
    }

    /// Fetch the raw value stored under `key`.
    ///
    /// The request goes to `base_url` and `key` concatenated as-is, so keys
    /// must already be URL-safe. Anything other than a 200 response is an
    /// error; the body of a 200 response is returned untouched.
    pub async fn fetch(
        &self,
        base_url: &str,
        key: &str,
        headers: &[Header],
    ) -> Result<Vec<u8>, MetadataError> {
        let url = format!("{base_url}{key}");

        let mut request = self.inner.get(&url);
        for h in headers {
            request = request.header(h.name, h.value);
        }

        info!("GET {url}");

        let response = request.send().await.map_err(MetadataError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MetadataError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(MetadataError::Read)?;
        Ok(body.to_vec())
    }
}
