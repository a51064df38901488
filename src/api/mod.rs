//! HTTP API: stats lookup and health probes

pub mod response;
pub mod services;

pub use response::{ErrorBody, ErrorCode};
