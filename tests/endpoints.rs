//! End-to-end tests of the HTTP surface.

use std::time::Duration;

use httpserver::observability::Metrics;

mod common;

#[tokio::test]
async fn test_healthz_returns_ok() {
    let server = common::start_server(common::test_config()).await;
    let client = common::client();

    let res = client
        .get(common::url(server.local_addr(), "/healthz?probe=liveness"))
        .header("x-ignored", "1")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok\n");

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_hello_reflects_headers() {
    let server = common::start_server(common::test_config()).await;
    let client = common::client();

    let res = client
        .get(common::url(server.local_addr(), "/hello"))
        .header("x-request-tag", "alpha")
        .header("x-multi", "one")
        .header("x-multi", "two")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("x-request-tag").unwrap(), "alpha");
    let multi: Vec<&str> = res
        .headers()
        .get_all("x-multi")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(multi, ["one", "two"]);
    assert!(res.headers().get("version").is_none());

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_hello_sets_version_header() {
    let mut config = common::test_config();
    config.echo.version = Some("v1.2.3".to_string());
    let server = common::start_server(config).await;

    let res = common::client()
        .get(common::url(server.local_addr(), "/hello"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers().get("version").unwrap(), "v1.2.3");

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_hello_with_proxy_headers_still_succeeds() {
    let server = common::start_server(common::test_config()).await;

    let res = common::client()
        .get(common::url(server.local_addr(), "/hello"))
        .header("x-real-ip", "not-an-ip")
        .header("x-forward-for", "198.51.100.9, 10.0.0.1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("x-forward-for").unwrap(), "198.51.100.9, 10.0.0.1");

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::start_server(common::test_config()).await;

    let res = common::client()
        .get(common::url(server.local_addr(), "/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let res = common::client()
        .get(common::url(server.local_addr(), "/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404, "metrics route only exists with a registry");

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_metrics_count_matches_hello_requests() {
    let metrics = Metrics::new("httpserver").unwrap();
    let server = common::start_server_with_metrics(common::test_config(), metrics.clone()).await;
    let client = common::client();

    let requests = 4;
    for _ in 0..requests {
        let res = client
            .get(common::url(server.local_addr(), "/hello"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    // Health checks are not timed.
    client
        .get(common::url(server.local_addr(), "/healthz"))
        .send()
        .await
        .unwrap();

    let res = client
        .get(common::url(server.local_addr(), "/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();

    assert!(body.contains("# HELP httpserver_execution_latency_seconds Time Spent."));
    assert_eq!(
        common::histogram_count(&body, metrics.latency_name(), "total"),
        Some(requests)
    );

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_hello_latency_includes_artificial_delay() {
    let metrics = Metrics::new("delayed").unwrap();
    let config = common::slow_config(Duration::from_millis(50));
    let server = common::start_server_with_metrics(config, metrics.clone()).await;

    let started = std::time::Instant::now();
    common::client()
        .get(common::url(server.local_addr(), "/hello"))
        .send()
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));

    let exposition = metrics.render();
    assert_eq!(common::histogram_count(&exposition, "delayed_execution_latency_seconds", "total"), Some(1));

    server.shutdown(Duration::from_secs(5)).await.unwrap();
}
