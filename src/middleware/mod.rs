//! Tower middleware shared by both services.
//!
//! [`request_log`] wraps every route and emits the one-per-request
//! access line once the handler has produced its response.

pub mod request_log;

pub use request_log::log_requests;
