//! Stateless services: URL signing and task URL composition.

pub mod request_builder;
pub mod signing;

pub use request_builder::{Clock, FixedClock, SystemClock, TaskRequest, TaskUrlBuilder};
pub use signing::{sign_url, SignedUrl, UrlSigner};
