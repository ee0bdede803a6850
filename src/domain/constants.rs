//! Wire-level constants for the Xinde task API.
//! Keep this intentionally small; only broadly reused literals should live here.

// === Endpoint ===

/// Production task endpoint (create via POST, query via GET)
pub const DEFAULT_TASK_ENDPOINT: &str = "https://api.xindedata.com/v1/task";

// === Query parameter names ===

/// Application id query parameter
pub const PARAM_APP_ID: &str = "appid";

/// Unix timestamp (seconds) query parameter
pub const PARAM_TIME: &str = "time";

/// Task id query parameter (status queries only)
pub const PARAM_TASK_ID: &str = "tid";

/// Signature query parameter, always appended last
pub const PARAM_SIGNATURE: &str = "signature";

// === Task body ===

/// Task type for the two-factor (name + national id) check
pub const TASK_TYPE_AUTH2: &str = "auth2";

/// Content type used when the task body is sent as JSON
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

// === Transport defaults ===

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("xinde-client/", env!("CARGO_PKG_VERSION"));
