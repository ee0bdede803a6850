//! Xinde API client library
//!
//! Builds signed request URLs for the Xinde identity-verification API,
//! submits two-factor verification tasks and polls their status.
//!
//! ```
//! use xinde_client::{AppSecret, UrlSigner};
//!
//! let signer = UrlSigner::new(AppSecret::new("sec"));
//! let signed = signer.sign("https://api.xindedata.com/v1/task?appid=demo&time=1000");
//! assert!(signed.as_str().ends_with("&signature=06c02ddd474fa5225a6230eb3d03d28ff1d8eabb"));
//! ```

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use adapters::task_http_client::{
    ApiResponse, BodyEncoding, TaskHttpClient, TaskHttpConfig,
};
pub use domain::constants;
pub use domain::query::{QueryParams, ValueSplit};
pub use domain::types::{AppId, AppSecret, EndpointUrl, TaskId};
pub use infra::config::{ClientConfiguration, ConfigManager};
pub use infra::error::{ClientError, ClientResult};
pub use pipelines::task::{TaskFailure, TaskOutcome, TaskWorkflow};
pub use services::request_builder::{Clock, FixedClock, SystemClock, TaskRequest, TaskUrlBuilder};
pub use services::signing::{sign_url, SignedUrl, UrlSigner};

