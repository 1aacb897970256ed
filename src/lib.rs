pub mod archive;
pub mod download;
pub mod fetch;
pub mod http;
pub mod launch;
pub mod platform;
pub mod progress;
pub mod runtime;
