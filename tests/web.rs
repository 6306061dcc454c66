use coinboard::api::CoinGeckoClient;
use coinboard::config::DashboardConfig;
use coinboard::dashboard::Dashboard;
use coinboard::market::MarketData;
use coinboard::web::{router, AppState};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;

async fn upstream() -> (ServerGuard, Vec<Mock>) {
    let mut server = Server::new_async().await;
    let prices = server
        .mock("GET", "/api/v3/simple/price")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"bitcoin":{"usd":65000},"ethereum":{"usd":3200}}"#)
        .create_async()
        .await;
    let ethereum = server
        .mock("GET", "/api/v3/coins/ethereum/market_chart")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"prices":[[1717200000000,3780.5],[1717286400000,3815.0]]}"#)
        .create_async()
        .await;
    let bitcoin = server
        .mock("GET", "/api/v3/coins/bitcoin/market_chart")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    (server, vec![prices, ethereum, bitcoin])
}

/// Serve the dashboard on an ephemeral port and return its base URL.
async fn serve(upstream_url: &str) -> String {
    let client = CoinGeckoClient::new(upstream_url, Duration::from_secs(5)).unwrap();
    let market = MarketData::new(
        client,
        vec!["bitcoin".to_string(), "ethereum".to_string()],
        "usd",
        Duration::from_secs(300),
    );
    let dashboard = Dashboard::new(Arc::new(market), DashboardConfig::default());
    let app = router(Arc::new(AppState::new(dashboard)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_index_page() {
    let (upstream, _mocks) = upstream().await;
    let base = serve(&upstream.url()).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();

    assert!(html.contains("$65,000"));
    assert!(html.contains("$3,200"));
    assert!(html.contains("Ethereum (7-Day Price Chart)"));
    assert!(html.contains("id=\"chart-0\""));
    assert!(html.contains("Error fetching historical data: server returned 500"));
    assert!(html.contains("Could not load Bitcoin chart data."));
}

#[tokio::test]
async fn test_dashboard_json() {
    let (upstream, _mocks) = upstream().await;
    let base = serve(&upstream.url()).await;

    let json: serde_json::Value = reqwest::get(format!("{}/api/dashboard", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["metrics"]["status"], "ready");
    assert_eq!(json["metrics"]["detail"][0]["value"], "$65,000");
    assert_eq!(json["charts"][0]["series"]["status"], "ready");
    assert_eq!(json["charts"][1]["series"]["status"], "error");
}

#[tokio::test]
async fn test_prices_and_history_endpoints() {
    let (upstream, _mocks) = upstream().await;
    let base = serve(&upstream.url()).await;

    let prices: serde_json::Value = reqwest::get(format!("{}/api/prices", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(prices["prices"][0]["asset_id"], "bitcoin");
    assert_eq!(prices["prices"][0]["amount"], "65000");

    let history = reqwest::get(format!("{}/api/history/ethereum?days=7", base))
        .await
        .unwrap();
    assert_eq!(history.status(), 200);
    let history: serde_json::Value = history.json().await.unwrap();
    assert_eq!(history["points"][0]["date"], "2024-06-01");
    assert_eq!(history["points"].as_array().unwrap().len(), 2);

    let failed = reqwest::get(format!("{}/api/history/bitcoin?days=30", base))
        .await
        .unwrap();
    assert_eq!(failed.status(), 502);

    let invalid = reqwest::get(format!("{}/api/history/NotACoin", base))
        .await
        .unwrap();
    assert_eq!(invalid.status(), 400);
    let body: serde_json::Value = invalid.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("unsupported asset id"));
}

#[tokio::test]
async fn test_health() {
    let (upstream, _mocks) = upstream().await;
    let base = serve(&upstream.url()).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.text().await.unwrap(), "ok");
}
