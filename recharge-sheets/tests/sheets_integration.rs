//! Integration tests for the spreadsheet webhook client.
//!
//! Each test starts an in-process axum server that records the JSON bodies
//! it receives and answers with a configurable status.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::NaiveDate;
use recharge_sheets::SheetsClient;
use recharge_types::RemoteSync;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Recorder {
    bodies: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    delay: Duration,
}

async fn capture(State(recorder): State<Recorder>, Json(body): Json<Value>) -> StatusCode {
    recorder.bodies.lock().unwrap().push(body);
    tokio::time::sleep(recorder.delay).await;
    recorder.status
}

/// Helper to start a webhook stub; returns its URL and the recorded bodies.
async fn start_stub(status: StatusCode, delay: Duration) -> (String, Arc<Mutex<Vec<Value>>>) {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder {
        bodies: bodies.clone(),
        status,
        delay,
    };
    let app = Router::new()
        .route("/macros/s/test/exec", post(capture))
        .with_state(recorder);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/macros/s/test/exec"), bodies)
}

#[tokio::test]
async fn test_connection_probe() {
    let (url, bodies) = start_stub(StatusCode::OK, Duration::ZERO).await;
    let client = SheetsClient::new(url);

    assert!(client.test_connection().await);
    assert_eq!(bodies.lock().unwrap()[0], json!({"action": "test"}));
}

#[tokio::test]
async fn test_connection_fails_on_error_status() {
    let (url, _) = start_stub(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;
    let client = SheetsClient::new(url);

    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn test_push_amount() {
    let (url, bodies) = start_stub(StatusCode::OK, Duration::ZERO).await;
    let client = SheetsClient::new(url);
    let at = NaiveDate::from_ymd_opt(2025, 12, 22)
        .unwrap()
        .and_hms_opt(9, 14, 32)
        .unwrap();

    assert!(client.push_amount(96.7, at).await);
    assert_eq!(
        bodies.lock().unwrap()[0],
        json!({"dateTime": "22-12-2025 09:14:32", "amountToPay": "96.700"})
    );
}

#[tokio::test]
async fn test_push_balance() {
    let (url, bodies) = start_stub(StatusCode::OK, Duration::ZERO).await;
    let client = SheetsClient::new(url);

    assert!(client.push_balance(5500.0).await);
    assert_eq!(
        bodies.lock().unwrap()[0],
        json!({"action": "saveWallet", "balance": "5500.00"})
    );
}

#[tokio::test]
async fn test_push_failure_is_swallowed() {
    let (url, _) = start_stub(StatusCode::OK, Duration::ZERO).await;
    let client = SheetsClient::new(url);
    assert!(client.push_balance(1.0).await);

    let (url, _) = start_stub(StatusCode::BAD_GATEWAY, Duration::ZERO).await;
    let failing = SheetsClient::new(url);
    assert!(!failing.push_balance(1.0).await);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SheetsClient::new(format!("http://{addr}/macros/s/test/exec"));
    assert!(!client.test_connection().await);
    assert!(!client.push_balance(10.0).await);
}

#[tokio::test]
async fn test_timeout_fails_push() {
    let (url, _) = start_stub(StatusCode::OK, Duration::from_secs(2)).await;
    let client = SheetsClient::with_timeout(url, Duration::from_millis(200)).unwrap();

    assert!(!client.push_balance(10.0).await);
}
