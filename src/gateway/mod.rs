//! `GET /call-echo`: forwards `msg` to the echo origin and translates
//! the outcome into the gateway's own response contract.
//!
//! Success wraps the origin's JSON body. Every failure category, be it
//! a non-200 reply, a timeout or a transport error, collapses into the
//! same 503 body; only the `cause` tag on the error log line differs.

pub mod upstream;

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::params::{self, ErrorBody};
use upstream::{EchoCallOutcome, EchoClient, FailureCause};

pub const UNAVAILABLE: &str = "Echo service unavailable";
const ACTION: &str = "call-echo";

pub struct GatewayState {
    pub service_name: Arc<str>,
    pub echo: EchoClient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayResponse {
    #[serde(rename = "serviceB")]
    pub service_b: String,
    #[serde(rename = "echoServiceResponse")]
    pub echo_service_response: serde_json::Value,
}

pub async fn call_echo_handler(
    State(state): State<Arc<GatewayState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(msg) = params::required_msg(query.as_deref()) else {
        return params::missing_msg();
    };

    match state.echo.call(&msg).await {
        EchoCallOutcome::Success { body, .. } => (
            StatusCode::OK,
            Json(GatewayResponse {
                service_b: "ok".to_string(),
                echo_service_response: body,
            }),
        )
            .into_response(),
        EchoCallOutcome::NonSuccessStatus(_) => {
            unavailable(&state.service_name, FailureCause::Non200Response)
        }
        EchoCallOutcome::Timeout => unavailable(&state.service_name, FailureCause::Timeout),
        EchoCallOutcome::ConnectionFailure(_) => {
            unavailable(&state.service_name, FailureCause::ConnectionError)
        }
    }
}

fn unavailable(service: &str, cause: FailureCause) -> Response {
    tracing::error!(
        service = %service,
        action = %ACTION,
        error = UNAVAILABLE,
        cause = %cause
    );
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorBody::new(UNAVAILABLE)),
    )
        .into_response()
}
