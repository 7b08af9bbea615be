use ataix_cli::api_client::{ApiClient, ApiConfig, ErrorKind, FetchError};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

fn client(base_url: String, key: &str, timeout: Duration) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url,
        api_key: key.to_string(),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn test_success_returns_json_and_sends_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/currencies")
        .match_header("API-KEY", "secret-key")
        .match_header("Accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": true, "result": [{"code": "BTC", "name": "Bitcoin"}]}"#)
        .create_async()
        .await;

    let client = client(server.url(), "secret-key", Duration::from_secs(5));
    let value = client.fetch("/api/currencies").await.unwrap();

    assert_eq!(value["result"][0]["code"], json!("BTC"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_key_is_sent_as_empty_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/prices")
        .match_header("API-KEY", "")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client(server.url(), "", Duration::from_secs(5));
    assert_eq!(client.fetch("/api/prices").await, Ok(json!([])));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/symbols")
        .with_status(404)
        .with_body("not here")
        .create_async()
        .await;

    let client = client(server.url(), "k", Duration::from_secs(5));
    let err = client.fetch("/api/symbols").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    let message = err.to_string();
    assert!(message.starts_with("HTTP error: 404"), "{}", message);
    assert!(message.contains("/api/symbols"));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/prices")
        .with_status(500)
        .create_async()
        .await;

    let client = client(server.url(), "k", Duration::from_secs(5));
    match client.fetch("/api/prices").await {
        Err(FetchError::Http { status, reason, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/prices")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client(server.url(), "k", Duration::from_secs(5));
    let err = client.fetch("/api/prices").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without ever answering
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = client(format!("http://{}", addr), "k", Duration::from_millis(200));
    let err = client.fetch("/api/currencies").await.unwrap_err();

    assert_eq!(err, FetchError::Timeout);
    assert_eq!(err.to_string(), "connection timeout");
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr), "k", Duration::from_secs(5));
    let err = client.fetch("/api/currencies").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().starts_with("error: "));
}

#[tokio::test]
async fn test_unsendable_key_reports_per_fetch_without_sending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/symbols")
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let client = client(server.url(), "key\r\nwith-newline", Duration::from_secs(5));
    for _ in 0..2 {
        let err = client.fetch("/api/symbols").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(ref msg) if msg.starts_with("invalid API-KEY header")));
    }
    mock.assert_async().await;
}
