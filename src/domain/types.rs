//! Type-safe wrappers using new-type pattern
//!
//! Ids and endpoints are validated once at the edge so the signer and request
//! builders can treat them as plain text. Values are kept exactly as given.

use crate::infra::error::{ClientError, ClientResult};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Application id issued by the service provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppId(String);

impl AppId {
    /// Rejects empty or all-whitespace ids; the value itself is not altered.
    pub fn new(id: impl AsRef<str>) -> ClientResult<Self> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(ClientError::ValidationError(
                "App id must not be empty".to_string(),
            ));
        }
        Ok(AppId(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AppId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared secret paired with an [`AppId`].
///
/// Neither `Debug` nor `Display` reveal the value.
#[derive(Clone)]
pub struct AppSecret(String);

impl AppSecret {
    /// Wrap a secret verbatim, surrounding whitespace included.
    ///
    /// An empty secret is accepted: it still yields a signature, just one the
    /// server will reject.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            log::warn!("app secret is empty; signatures will not verify");
        }
        AppSecret(secret)
    }

    /// Raw secret text for building the signing string
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for AppSecret {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppSecret([REDACTED])")
    }
}

impl fmt::Display for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[SECRET REDACTED]")
    }
}

/// Opaque task id returned by task creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(tid: impl AsRef<str>) -> ClientResult<Self> {
        let tid = tid.as_ref();
        if tid.trim().is_empty() {
            return Err(ClientError::ValidationError(
                "Task id must not be empty".to_string(),
            ));
        }
        Ok(TaskId(tid.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task endpoint, without a query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    pub fn new(url: impl AsRef<str>) -> ClientResult<Self> {
        let url = url.as_ref().trim();
        Self::validate_url(url)?;
        Ok(EndpointUrl(url.trim_end_matches('/').to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate_url(url: &str) -> ClientResult<()> {
        let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
        else {
            return Err(ClientError::ValidationError(format!(
                "Endpoint URL must start with http:// or https://, got: {url}"
            )));
        };

        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() {
            return Err(ClientError::ValidationError(format!(
                "Endpoint URL has no host: {url}"
            )));
        }

        // Query parameters are composed by the request builders.
        if url.contains('?') || url.contains('#') {
            return Err(ClientError::ValidationError(format!(
                "Endpoint URL must not carry a query or fragment: {url}"
            )));
        }

        Ok(())
    }
}

impl Default for EndpointUrl {
    fn default() -> Self {
        EndpointUrl(crate::domain::constants::DEFAULT_TASK_ENDPOINT.to_string())
    }
}

impl FromStr for EndpointUrl {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
