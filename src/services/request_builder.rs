//! Task URL builders.
//!
//! Compose the unsigned task URLs (`appid`, `time`, optional `tid`) and hand
//! them to the signer. Values are percent-encoded on the way in so that the
//! signer's decoding recovers exactly what was passed.

use crate::domain::constants::{PARAM_APP_ID, PARAM_TASK_ID, PARAM_TIME, TASK_TYPE_AUTH2};
use crate::domain::types::{AppId, EndpointUrl, TaskId};
use crate::services::signing::{SignedUrl, UrlSigner};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the `time` query parameter.
pub trait Clock: Send + Sync {
    /// Whole seconds since the Unix epoch.
    fn unix_seconds(&self) -> u64;
}

/// Wall clock, floored to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        // A clock before 1970 is a host misconfiguration; send 0 and let the
        // server reject the stale timestamp.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}

/// Body of a two-factor verification task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRequest {
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

impl TaskRequest {
    /// Name + national id check (`type=auth2`).
    #[must_use]
    pub fn auth2(user_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            task_type: TASK_TYPE_AUTH2.to_string(),
            user_name: user_name.into(),
            user_id: user_id.into(),
        }
    }
}

/// Builds signed task URLs for one application.
pub struct TaskUrlBuilder<C: Clock = SystemClock> {
    endpoint: EndpointUrl,
    app_id: AppId,
    signer: UrlSigner,
    clock: C,
}

impl TaskUrlBuilder<SystemClock> {
    #[must_use]
    pub fn new(endpoint: EndpointUrl, app_id: AppId, signer: UrlSigner) -> Self {
        Self::with_clock(endpoint, app_id, signer, SystemClock)
    }
}

impl<C: Clock> TaskUrlBuilder<C> {
    #[must_use]
    pub fn with_clock(endpoint: EndpointUrl, app_id: AppId, signer: UrlSigner, clock: C) -> Self {
        Self {
            endpoint,
            app_id,
            signer,
            clock,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Unsigned `<endpoint>?appid=..&time=..`
    #[must_use]
    pub fn create_task_url(&self) -> String {
        compose(
            &self.endpoint,
            &[
                (PARAM_APP_ID, self.app_id.as_str()),
                (PARAM_TIME, &self.clock.unix_seconds().to_string()),
            ],
        )
    }

    /// Unsigned `<endpoint>?tid=..&appid=..&time=..`
    #[must_use]
    pub fn task_status_url(&self, tid: &TaskId) -> String {
        compose(
            &self.endpoint,
            &[
                (PARAM_TASK_ID, tid.as_str()),
                (PARAM_APP_ID, self.app_id.as_str()),
                (PARAM_TIME, &self.clock.unix_seconds().to_string()),
            ],
        )
    }

    #[must_use]
    pub fn signed_create_task_url(&self) -> SignedUrl {
        self.signer.sign(&self.create_task_url())
    }

    #[must_use]
    pub fn signed_task_status_url(&self, tid: &TaskId) -> SignedUrl {
        self.signer.sign(&self.task_status_url(tid))
    }
}

fn compose(endpoint: &EndpointUrl, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{query}", endpoint.as_str())
}
