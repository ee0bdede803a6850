//! `TaskWorkflow`: orchestrates task creation and status queries.
//!
//! Steps:
//! 1. Build the unsigned task URL (`TaskUrlBuilder`)
//! 2. Sign it (`UrlSigner`)
//! 3. Issue one request via `TaskHttpClient`
//! 4. Return the signed URL together with the raw response

use crate::adapters::task_http_client::{ApiResponse, TaskHttpClient, TaskHttpConfig};
use crate::domain::types::{AppId, AppSecret, EndpointUrl, TaskId};
use crate::infra::error::{ClientError, ClientResult};
use crate::services::request_builder::{Clock, SystemClock, TaskRequest, TaskUrlBuilder};
use crate::services::signing::{SignedUrl, UrlSigner};
use crate::ValueSplit;

/// Result of one workflow call.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub signed_url: SignedUrl,
    pub response: ApiResponse,
}

/// Failure of one workflow call; keeps the signed URL for reporting.
#[derive(Debug)]
pub struct TaskFailure {
    pub signed_url: SignedUrl,
    pub error: ClientError,
}

impl From<TaskFailure> for ClientError {
    fn from(failure: TaskFailure) -> Self {
        failure.error
    }
}

pub struct TaskWorkflow<C: Clock = SystemClock> {
    builder: TaskUrlBuilder<C>,
    http: TaskHttpClient,
}

impl TaskWorkflow<SystemClock> {
    /// Workflow against `endpoint` for one application.
    pub fn new(
        endpoint: EndpointUrl,
        app_id: AppId,
        secret: AppSecret,
        split: ValueSplit,
        http_cfg: TaskHttpConfig,
    ) -> ClientResult<Self> {
        Self::with_clock(endpoint, app_id, secret, split, http_cfg, SystemClock)
    }
}

impl<C: Clock> TaskWorkflow<C> {
    pub fn with_clock(
        endpoint: EndpointUrl,
        app_id: AppId,
        secret: AppSecret,
        split: ValueSplit,
        http_cfg: TaskHttpConfig,
        clock: C,
    ) -> ClientResult<Self> {
        let signer = UrlSigner::new(secret).with_value_split(split);
        let builder = TaskUrlBuilder::with_clock(endpoint, app_id, signer, clock);
        let http = TaskHttpClient::new(http_cfg)?;
        Ok(Self { builder, http })
    }

    /// Submit a name + national id verification task.
    pub async fn create_task(
        &self,
        user_name: &str,
        user_id: &str,
    ) -> Result<TaskOutcome, TaskFailure> {
        let signed_url = self.builder.signed_create_task_url();
        log::debug!("create task via {}", self.builder.endpoint());
        let task = TaskRequest::auth2(user_name, user_id);
        match self.http.post_task(&signed_url, &task).await {
            Ok(response) => Ok(TaskOutcome {
                signed_url,
                response,
            }),
            Err(error) => Err(TaskFailure { signed_url, error }),
        }
    }

    /// Poll the status of a previously created task.
    pub async fn task_status(&self, tid: &TaskId) -> Result<TaskOutcome, TaskFailure> {
        let signed_url = self.builder.signed_task_status_url(tid);
        log::debug!("task status for {tid} via {}", self.builder.endpoint());
        match self.http.get_status(&signed_url).await {
            Ok(response) => Ok(TaskOutcome {
                signed_url,
                response,
            }),
            Err(error) => Err(TaskFailure { signed_url, error }),
        }
    }
}
