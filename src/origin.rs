//! `GET /echo`: the origin service's only business endpoint.

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::params;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoResponse {
    pub echo: String,
}

pub async fn echo_handler(RawQuery(query): RawQuery) -> Response {
    let Some(msg) = params::required_msg(query.as_deref()) else {
        return params::missing_msg();
    };

    (StatusCode::OK, Json(EchoResponse { echo: msg })).into_response()
}
