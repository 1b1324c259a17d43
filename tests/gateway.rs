//! Integration tests for the gateway's `GET /call-echo` endpoint and its
//! failure translation against real and stub origins.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use echo_chain::config::{validation, GatewayConfig, ServiceConfig};
use echo_chain::gateway::GatewayResponse;
use echo_chain::server;

const UNAVAILABLE_BODY: &str = r#"{"error":"Echo service unavailable"}"#;

async fn start(router: Router) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

async fn start_real_origin() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let config = ServiceConfig {
        service_name: "service-a".into(),
        host: "127.0.0.1".into(),
        port: 0,
    };
    start(server::origin_router(&config)).await
}

/// Origin stub answering every `/echo` with `status` and a fixed body,
/// counting hits.
async fn start_stub_origin(
    status: StatusCode,
    delay: Duration,
) -> (SocketAddr, Arc<AtomicUsize>, tokio::sync::oneshot::Sender<()>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/echo",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                (status, Json(serde_json::json!({"echo": "stub"})))
            }
        }),
    );
    let (addr, shutdown) = start(router).await;
    (addr, hits, shutdown)
}

fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn gateway_config(origin: SocketAddr, timeout: Duration) -> GatewayConfig {
    let base = format!("http://{origin}").parse().unwrap();
    GatewayConfig {
        service: ServiceConfig {
            service_name: "service-b".into(),
            host: "127.0.0.1".into(),
            port: 0,
        },
        echo_endpoint: validation::echo_endpoint(&base),
        echo_timeout: timeout,
    }
}

async fn start_gateway(
    origin: SocketAddr,
    timeout: Duration,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let router = server::gateway_router(
        &gateway_config(origin, timeout),
        server::build_http_client(),
    );
    start(router).await
}

#[tokio::test]
async fn forwards_to_healthy_origin() {
    let (origin, origin_shutdown) = start_real_origin().await;
    let (gateway, gateway_shutdown) = start_gateway(origin, Duration::from_secs(1)).await;

    let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        r#"{"serviceB":"ok","echoServiceResponse":{"echo":"hello"}}"#
    );

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn msg_survives_the_round_trip() {
    let (origin, origin_shutdown) = start_real_origin().await;
    let (gateway, gateway_shutdown) = start_gateway(origin, Duration::from_secs(1)).await;

    let msg = "a b&msg=c \u{2713}";
    let mut url = url::Url::parse(&format!("http://{gateway}/call-echo")).unwrap();
    url.query_pairs_mut().append_pair("msg", msg);

    let body: GatewayResponse = reqwest::get(url).await.unwrap().json().await.unwrap();
    assert_eq!(body.service_b, "ok");
    assert_eq!(body.echo_service_response, serde_json::json!({ "echo": msg }));

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn missing_msg_makes_no_outbound_call() {
    let (origin, hits, origin_shutdown) =
        start_stub_origin(StatusCode::OK, Duration::ZERO).await;
    let (gateway, gateway_shutdown) = start_gateway(origin, Duration::from_secs(1)).await;

    for path in ["/call-echo", "/call-echo?msg="] {
        let resp = reqwest::get(format!("http://{gateway}{path}")).await.unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(
            resp.text().await.unwrap(),
            r#"{"error":"msg query param is required"}"#
        );
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn non_200_origin_status_never_leaks() {
    for status in [
        StatusCode::NOT_FOUND,
        StatusCode::BAD_REQUEST,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::CREATED,
    ] {
        let (origin, hits, origin_shutdown) = start_stub_origin(status, Duration::ZERO).await;
        let (gateway, gateway_shutdown) = start_gateway(origin, Duration::from_secs(1)).await;

        let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 503, "origin status {status}");
        assert_eq!(resp.text().await.unwrap(), UNAVAILABLE_BODY);
        assert_eq!(hits.load(Ordering::SeqCst), 1, "no retries");

        let _ = origin_shutdown.send(());
        let _ = gateway_shutdown.send(());
    }
}

#[tokio::test]
async fn slow_origin_times_out_within_bound() {
    let (origin, _hits, origin_shutdown) =
        start_stub_origin(StatusCode::OK, Duration::from_secs(3)).await;
    let timeout = Duration::from_millis(200);
    let (gateway, gateway_shutdown) = start_gateway(origin, timeout).await;

    let started = Instant::now();
    let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(resp.status(), 503);
    assert_eq!(resp.text().await.unwrap(), UNAVAILABLE_BODY);
    assert!(elapsed >= timeout, "returned before the deadline: {elapsed:?}");
    assert!(
        elapsed < Duration::from_millis(1500),
        "timeout not enforced: {elapsed:?}"
    );

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let (gateway, gateway_shutdown) = start_gateway(closed_port(), Duration::from_secs(1)).await;

    let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
    assert_eq!(resp.text().await.unwrap(), UNAVAILABLE_BODY);

    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn non_json_success_body_is_unavailable() {
    let router = Router::new().route("/echo", get(|| async { "plain text, not json" }));
    let (origin, origin_shutdown) = start(router).await;
    let (gateway, gateway_shutdown) = start_gateway(origin, Duration::from_secs(1)).await;

    let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 503);
    assert_eq!(resp.text().await.unwrap(), UNAVAILABLE_BODY);

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}

#[tokio::test]
async fn failure_bodies_are_byte_identical() {
    let (bad_origin, _, bad_shutdown) =
        start_stub_origin(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;
    let (slow_origin, _, slow_shutdown) =
        start_stub_origin(StatusCode::OK, Duration::from_secs(3)).await;

    let timeout = Duration::from_millis(200);
    let mut bodies = Vec::new();
    let mut shutdowns = Vec::new();
    for origin in [bad_origin, slow_origin, closed_port()] {
        let (gateway, shutdown) = start_gateway(origin, timeout).await;
        let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=hello"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 503);
        bodies.push(resp.bytes().await.unwrap());
        shutdowns.push(shutdown);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);

    for shutdown in shutdowns {
        let _ = shutdown.send(());
    }
    let _ = bad_shutdown.send(());
    let _ = slow_shutdown.send(());
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let (origin, origin_shutdown) = {
        let config = ServiceConfig {
            service_name: "service-a".into(),
            host: "127.0.0.1".into(),
            port: 0,
        };
        start(Router::new().nest("/svc-a", server::origin_router(&config))).await
    };

    let base = format!("http://{origin}/svc-a/").parse().unwrap();
    let config = GatewayConfig {
        echo_endpoint: validation::echo_endpoint(&base),
        ..gateway_config(origin, Duration::from_secs(1))
    };
    let (gateway, gateway_shutdown) =
        start(server::gateway_router(&config, server::build_http_client())).await;

    let resp = reqwest::get(format!("http://{gateway}/call-echo?msg=nested"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: GatewayResponse = resp.json().await.unwrap();
    assert_eq!(body.echo_service_response, serde_json::json!({"echo": "nested"}));

    let _ = origin_shutdown.send(());
    let _ = gateway_shutdown.send(());
}
