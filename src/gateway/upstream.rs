//! Timeout-bounded outbound call to the echo origin.
//!
//! [`EchoClient::call`] never fails: every outcome, including transport
//! errors and deadline expiry, is folded into an [`EchoCallOutcome`]
//! that the handler matches on exhaustively.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use url::Url;

use crate::config::GatewayConfig;
use crate::params::MSG_PARAM;
use crate::server::HttpClient;

#[derive(Debug)]
pub enum EchoCallOutcome {
    /// Origin answered 200 with a JSON body.
    Success {
        status: StatusCode,
        body: serde_json::Value,
    },
    /// Origin answered, but not with a usable 200 JSON reply.
    NonSuccessStatus(StatusCode),
    /// No complete reply within the configured deadline.
    Timeout,
    /// Refused, unreachable, reset, or the body stream broke.
    ConnectionFailure(String),
}

/// Diagnostic tag attached to the gateway's failure log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Non200Response,
    Timeout,
    ConnectionError,
}

impl FailureCause {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Non200Response => "Non200Response",
            Self::Timeout => "Timeout",
            Self::ConnectionError => "ConnectionError",
        }
    }
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct EchoClient {
    client: HttpClient,
    endpoint: Url,
    timeout: Duration,
}

impl EchoClient {
    #[must_use]
    pub fn new(client: HttpClient, config: &GatewayConfig) -> Self {
        Self {
            client,
            endpoint: config.echo_endpoint.clone(),
            timeout: config.echo_timeout,
        }
    }

    /// `<endpoint>?msg=<msg>`, form-urlencoded.
    #[must_use]
    pub fn request_url(&self, msg: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(MSG_PARAM, msg);
        url
    }

    pub async fn call(&self, msg: &str) -> EchoCallOutcome {
        let url = self.request_url(msg);
        // The deadline covers connect, headers and body alike.
        match tokio::time::timeout(self.timeout, self.exchange(&url)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(
                    upstream = %url,
                    timeout = ?self.timeout,
                    "echo call timed out"
                );
                EchoCallOutcome::Timeout
            }
        }
    }

    async fn exchange(&self, url: &Url) -> EchoCallOutcome {
        let req = match Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .body(Full::new(Bytes::new()))
        {
            Ok(r) => r,
            Err(e) => return EchoCallOutcome::ConnectionFailure(e.to_string()),
        };

        let response = match self.client.request(req).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(upstream = %url, error = %e, "echo call transport failure");
                return EchoCallOutcome::ConnectionFailure(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(upstream = %url, status = status.as_u16(), "echo call non-200");
            return EchoCallOutcome::NonSuccessStatus(status);
        }

        let body = match response.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::debug!(upstream = %url, error = %e, "echo body read error");
                return EchoCallOutcome::ConnectionFailure(format!("body read error: {e}"));
            }
        };

        match serde_json::from_slice(&body) {
            Ok(body) => EchoCallOutcome::Success { status, body },
            Err(e) => {
                tracing::debug!(upstream = %url, error = %e, "echo body is not JSON");
                EchoCallOutcome::NonSuccessStatus(status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    fn client(base: &str) -> EchoClient {
        let config = GatewayConfig {
            service: ServiceConfig {
                service_name: "service-b".into(),
                host: "127.0.0.1".into(),
                port: 0,
            },
            echo_endpoint: crate::config::validation::echo_endpoint(&Url::parse(base).unwrap()),
            echo_timeout: Duration::from_millis(500),
        };
        EchoClient::new(crate::server::build_http_client(), &config)
    }

    #[tokio::test]
    async fn request_url_encodes_msg() {
        let client = client("http://localhost:8080");
        assert_eq!(
            client.request_url("hello world&x=1").as_str(),
            "http://localhost:8080/echo?msg=hello+world%26x%3D1"
        );
    }

    #[test]
    fn cause_tags_render_verbatim() {
        assert_eq!(FailureCause::Non200Response.to_string(), "Non200Response");
        assert_eq!(FailureCause::Timeout.to_string(), "Timeout");
        assert_eq!(FailureCause::ConnectionError.to_string(), "ConnectionError");
    }
}
