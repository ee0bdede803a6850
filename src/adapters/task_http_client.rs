//! HTTP client adapter for the task endpoint.
//! Issues exactly one request per call; there is no retry or failover.

use crate::domain::constants::{DEFAULT_TIMEOUT_SECS, JSON_CONTENT_TYPE, USER_AGENT};
use crate::infra::error::{ClientError, ClientResult};
use crate::services::request_builder::TaskRequest;
use crate::services::signing::SignedUrl;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Encoding of the task-creation body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`
    #[default]
    Form,
    /// `application/json;charset=utf-8`
    Json,
}

impl BodyEncoding {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyEncoding::Form => "form",
            BodyEncoding::Json => "json",
        }
    }
}

impl FromStr for BodyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "form" => Ok(BodyEncoding::Form),
            "json" => Ok(BodyEncoding::Json),
            other => Err(format!("unknown body encoding: {other}")),
        }
    }
}

impl fmt::Display for BodyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for task HTTP operations.
#[derive(Debug, Clone)]
pub struct TaskHttpConfig {
    pub timeout: Duration,
    pub body_encoding: BodyEncoding,
}

impl Default for TaskHttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            body_encoding: BodyEncoding::default(),
        }
    }
}

/// Successful (2xx) response from the task endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP adapter for task creation and status queries.
pub struct TaskHttpClient {
    cfg: TaskHttpConfig,
    http: reqwest::Client,
}

impl TaskHttpClient {
    /// Create a new client from config.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(cfg: TaskHttpConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { cfg, http })
    }

    #[must_use]
    pub fn config(&self) -> &TaskHttpConfig {
        &self.cfg
    }

    /// POST a task body to a signed task URL.
    pub async fn post_task(&self, url: &SignedUrl, task: &TaskRequest) -> ClientResult<ApiResponse> {
        log::info!(
            "submitting {} task ({} body)",
            task.task_type,
            self.cfg.body_encoding
        );
        let request = self.http.post(url.as_str());
        let request = match self.cfg.body_encoding {
            BodyEncoding::Form => request.form(task),
            BodyEncoding::Json => request
                .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(serde_json::to_string(task).map_err(|e| {
                    ClientError::InvalidInput(format!("Failed to encode task body: {e}"))
                })?),
        };
        Self::execute(request).await
    }

    /// GET the status of a task from a signed status URL.
    pub async fn get_status(&self, url: &SignedUrl) -> ClientResult<ApiResponse> {
        log::info!("querying task status");
        Self::execute(self.http.get(url.as_str())).await
    }

    async fn execute(request: reqwest::RequestBuilder) -> ClientResult<ApiResponse> {
        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("HTTP error: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Read body failed: {e}")))?;
        log::debug!("task endpoint answered HTTP {} ({} bytes)", status.as_u16(), body.len());

        if !status.is_success() {
            log::warn!("task endpoint returned HTTP {status}");
            return Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = TaskHttpConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.body_encoding, BodyEncoding::Form);
    }

    #[test]
    fn client_builds_from_default_config() {
        let client = TaskHttpClient::new(TaskHttpConfig::default()).unwrap();
        assert_eq!(client.config().body_encoding, BodyEncoding::Form);
    }

    #[test]
    fn body_encoding_parse() {
        assert_eq!("JSON".parse::<BodyEncoding>(), Ok(BodyEncoding::Json));
        assert_eq!("form".parse::<BodyEncoding>(), Ok(BodyEncoding::Form));
        assert!("xml".parse::<BodyEncoding>().is_err());
    }
}
