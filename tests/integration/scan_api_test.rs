// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use panelscan::config::settings::Settings;
use panelscan::domain::models::probe_result::ProbeResult;
use panelscan::domain::repositories::wordlist_repository::WordlistRepository;
use panelscan::domain::services::scan_service::ScanService;
use panelscan::engines::traits::{ProbeRequest, Prober};
use panelscan::presentation::routes;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

use super::helpers::{app, body_string, ndjson, scan_request, CountingProber};

async fn post_scan(prober: Arc<dyn Prober>, wordlist: &[&str], body: &str) -> (StatusCode, String) {
    let response = app(prober, wordlist)
        .oneshot(scan_request(body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_string(response).await)
}

#[tokio::test]
async fn scan_streams_progress_and_summary() {
    let prober = Arc::new(CountingProber::new(&["admin"]));
    let response = app(prober.clone(), &["admin", "login", "panel"])
        .oneshot(scan_request(r#"{"url": "example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/x-ndjson"
    );

    let records = ndjson(&body_string(response).await);
    assert_eq!(records.len(), 6);
    assert_eq!(
        records[0],
        json!({ "message": "Starting scan for: http://example.com\n" })
    );

    let logs: Vec<&Value> = records.iter().filter(|r| r["type"] == "log").collect();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs.iter().filter(|r| r["result"] == "OK").count(), 1);
    assert_eq!(logs.last().unwrap()["progress"], 100.0);

    assert_eq!(
        records[4],
        json!({ "message": "Scan completed. Found 1 admin panels.\n" })
    );
    assert_eq!(records[5]["type"], "complete");
    assert_eq!(
        records[5]["found_panels"],
        json!([{
            "path": "admin",
            "url": "http://example.com/admin",
            "status": 200,
            "result": "OK",
            "content_type": "text/html"
        }])
    );
    assert_eq!(prober.calls(), 3);
}

#[tokio::test]
async fn invalid_url_is_rejected_without_probing() {
    let prober = Arc::new(CountingProber::new(&["admin"]));
    let (status, body) = post_scan(prober.clone(), &["admin"], r#"{"url": "not a url"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "Invalid URL format" })
    );
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn missing_url_is_rejected() {
    let prober = Arc::new(CountingProber::new(&[]));
    for body in [r#"{}"#, r#"{"url": ""}"#, r#"{"url": null}"#] {
        let (status, response) = post_scan(prober.clone(), &["admin"], body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_str::<Value>(&response).unwrap(),
            json!({ "error": "No URL provided" })
        );
    }
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let prober = Arc::new(CountingProber::new(&[]));
    let (status, body) = post_scan(prober.clone(), &["admin"], "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert!(value["error"].is_string());
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn empty_wordlist_fails_before_streaming() {
    let prober = Arc::new(CountingProber::new(&[]));
    let (status, body) = post_scan(prober.clone(), &[], r#"{"url": "http://example.com"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "Admin paths wordlist is empty or not found" })
    );
    assert_eq!(prober.calls(), 0);
}

#[tokio::test]
async fn client_config_is_honoured() {
    let prober = Arc::new(CountingProber::new(&[]));
    let (status, body) = post_scan(
        prober.clone(),
        &["a", "b", "c", "d"],
        r#"{"url": "localhost:8080", "config": {"threads": 1, "timeout": 100, "verbose": true}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = ndjson(&body);
    assert_eq!(records.len(), 7);
    assert_eq!(records[6]["found_panels"], json!([]));
    assert_eq!(prober.calls(), 4);
}

struct PanickingProber;

#[async_trait]
impl Prober for PanickingProber {
    async fn probe(&self, _request: ProbeRequest<'_>) -> ProbeResult {
        panic!("probe blew up")
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn prober_panics_are_reported_as_errors_in_stream() {
    let (status, body) = post_scan(
        Arc::new(PanickingProber),
        &["admin", "login"],
        r#"{"url": "http://example.com"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = ndjson(&body);
    let logs: Vec<&Value> = records.iter().filter(|r| r["type"] == "log").collect();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|r| r["result"] == "NO"));
    assert!(logs
        .iter()
        .all(|r| r["message"].as_str().unwrap().contains("(Status: ERROR)")));
}

struct PanickingWordlist;

#[async_trait]
impl WordlistRepository for PanickingWordlist {
    async fn load(&self) -> Arc<[String]> {
        panic!("secret detail: wordlist storage corrupted")
    }
}

#[tokio::test]
async fn unexpected_failure_returns_generic_500() {
    let prober = Arc::new(CountingProber::new(&["admin"]));
    let router = routes::routes(
        Arc::new(ScanService::new(prober.clone())),
        Arc::new(PanickingWordlist),
        Arc::new(Settings::default()),
    );

    let response = router
        .oneshot(scan_request(r#"{"url": "http://example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "An internal server error occurred" })
    );
    assert!(!body.contains("secret detail"));
    assert_eq!(prober.calls(), 0);
}
