//! Query-string validation shared by both services.
//!
//! Both `/echo` and `/call-echo` accept exactly one required parameter,
//! `msg`. Extraction never rejects a request: a missing, empty or
//! undecodable value is simply "absent" and the caller answers 400.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const MSG_PARAM: &str = "msg";
pub const MISSING_MSG: &str = "msg query param is required";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// First value of `msg` in a raw query string, form-urlencoded
/// decoded. `None` when absent or when that first value is empty.
#[must_use]
pub fn required_msg(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == MSG_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub fn missing_msg() -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(MISSING_MSG))).into_response()
}
