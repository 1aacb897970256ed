//! HTTP client module for file downloads and status error handling.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{HttpStatusError, check_status, classify_error};
