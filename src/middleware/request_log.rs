//! Per-request access logging.
//!
//! [`log_requests`] starts a [`RequestTimer`] owned by the in-flight
//! request, runs the inner service, then emits exactly one INFO
//! event with `service`, `method`, `path`, `status` and `latencyMs`.
//! It runs after every handler outcome, 4xx and 5xx included.
//!
//! The inner service runs on its own task, so a client that hangs up
//! mid-request does not cancel the handler or swallow its access line.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

/// Start timestamp of a single request. Copied into that request's
/// task only, so concurrent requests never share it.
#[derive(Debug, Clone, Copy)]
pub struct RequestTimer {
    started: Instant,
}

impl RequestTimer {
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Whole milliseconds since [`RequestTimer::start`], truncated.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Path plus query as received, with a dangling `?` removed.
#[must_use]
pub fn display_path(uri: &Uri) -> String {
    uri.path_and_query().map_or_else(
        || uri.path().to_string(),
        |pq| pq.as_str().trim_end_matches('?').to_string(),
    )
}

pub async fn log_requests(
    State(service): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Response {
    let timer = RequestTimer::start();
    let method = request.method().clone();
    let path = display_path(request.uri());
    let task_path = path.clone();
    let task_method = method.clone();
    let task_service = Arc::clone(&service);

    let task = tokio::spawn(
        async move {
            let response = next.run(request).await;
            emit(&task_service, &task_method, &task_path, response.status(), timer);
            response
        }
        .in_current_span(),
    );

    match task.await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(service = %service, path = %path, error = %e, "handler task failed");
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            emit(&service, &method, &path, status, timer);
            status.into_response()
        }
    }
}

fn emit(service: &str, method: &Method, path: &str, status: StatusCode, timer: RequestTimer) {
    tracing::info!(
        service = %service,
        method = %method,
        path = %path,
        status = status.as_u16(),
        latencyMs = timer.elapsed_ms()
    );
}
