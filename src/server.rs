//! Axum router construction, the outbound HTTP client, and graceful
//! shutdown.
//!
//! [`origin_router`] and [`gateway_router`] mount `/health` plus the
//! service's business route behind the shared middleware stack.
//! [`build_http_client`] creates the hyper client used by the gateway,
//! [`serve`] runs a router until [`shutdown_signal`] fires.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnFailure, TraceLayer};

use crate::config::{GatewayConfig, ServiceConfig};
use crate::error::EchoChainError;
use crate::gateway::upstream::EchoClient;
use crate::gateway::{call_echo_handler, GatewayState};
use crate::health::health_handler;
use crate::middleware::log_requests;
use crate::origin::echo_handler;

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

#[must_use]
pub fn build_http_client() -> HttpClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https)
}

fn with_request_logging(router: Router, service_name: &str) -> Router {
    let service: Arc<str> = Arc::from(service_name);
    router.layer(
        ServiceBuilder::new()
            // 5xx is already reported by the handlers; keep the classifier quiet.
            .layer(
                TraceLayer::new_for_http()
                    .on_failure(DefaultOnFailure::new().level(tracing::Level::DEBUG)),
            )
            .layer(axum::middleware::from_fn_with_state(service, log_requests)),
    )
}

pub fn origin_router(config: &ServiceConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/echo", get(echo_handler));
    with_request_logging(router, &config.service_name)
}

pub fn gateway_router(config: &GatewayConfig, http_client: HttpClient) -> Router {
    let state = Arc::new(GatewayState {
        service_name: Arc::from(config.service.service_name.as_str()),
        echo: EchoClient::new(http_client, config),
    });

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/call-echo", get(call_echo_handler))
        .with_state(state);
    with_request_logging(router, &config.service.service_name)
}

/// Bind `config`'s listen address and serve `router` until `shutdown`
/// resolves, draining in-flight requests.
pub async fn serve<F>(
    config: &ServiceConfig,
    router: Router,
    shutdown: F,
) -> Result<(), EchoChainError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        service = %config.service_name,
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!(service = %config.service_name, "stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
