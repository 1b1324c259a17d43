//! `echo-chain health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as a one-line summary or raw JSON. Usable as a
//! container `HEALTHCHECK` since failures exit non-zero.

use std::time::Duration;

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::EchoChainError;
use crate::health::HealthResponse;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[must_use]
pub fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

pub async fn execute(args: HealthArgs) -> Result<(), EchoChainError> {
    let url = health_url(&args.url);
    let uri: hyper::Uri =
        url.parse().map_err(
            |e: hyper::http::uri::InvalidUri| EchoChainError::UriParse {
                source: Box::new(e),
            },
        )?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| EchoChainError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(PROBE_TIMEOUT, client.request(req))
        .await
        .map_err(|_| EchoChainError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| EchoChainError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| EchoChainError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(EchoChainError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => {
            println!(
                "\u{2713} {} is healthy (status: {})",
                args.url, health.status
            );
        }
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_url_appends_path() {
        assert_eq!(
            health_url("http://localhost:8081"),
            "http://localhost:8081/health"
        );
        assert_eq!(
            health_url("http://localhost:8081/"),
            "http://localhost:8081/health"
        );
    }
}
