// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! 端到端扫描流程测试
//!
//! 使用 wiremock 模拟目标站点，通过真实的 reqwest 探测器完成整个扫描

use futures::StreamExt;
use panelscan::domain::models::probe_result::{Classification, StatusOutcome};
use panelscan::domain::models::scan_event::ScanEvent;
use panelscan::domain::services::scan_service::{ScanOptions, ScanService};
use panelscan::engines::reqwest_prober::{ReqwestProber, DEFAULT_USER_AGENT};
use panelscan::utils::validators::normalize;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn candidates(paths: &[&str]) -> Arc<[String]> {
    paths.iter().map(|p| p.to_string()).collect()
}

async fn scan(server: &MockServer, paths: &[&str], options: ScanOptions) -> Vec<ScanEvent> {
    let prober = Arc::new(ReqwestProber::new(DEFAULT_USER_AGENT).unwrap());
    let service = ScanService::new(prober);
    let target = normalize(&server.uri()).unwrap();
    service
        .run_scan(target, candidates(paths), options)
        .unwrap()
        .collect()
        .await
}

#[tokio::test]
async fn test_single_admin_panel_is_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let events = scan(&server, &["admin"], ScanOptions::default()).await;

    assert_eq!(events.len(), 4);
    match &events[1] {
        ScanEvent::Progress { result, progress } => {
            assert_eq!(result.classification, Classification::Found);
            assert_eq!(result.content_type.as_deref(), Some("text/html"));
            assert_eq!(*progress, 100.0);
        }
        other => panic!("expected progress, got {:?}", other),
    }
    match events.last().unwrap() {
        ScanEvent::Summary { found_panels } => {
            assert_eq!(found_panels.len(), 1);
            assert_eq!(found_panels[0].path, "admin");
            assert_eq!(found_panels[0].resolved_url, format!("{}/admin", server.uri()));
        }
        other => panic!("expected summary, got {:?}", other),
    }
}

#[tokio::test]
async fn test_all_probes_timing_out_finds_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let options = ScanOptions {
        probe_timeout: Duration::from_millis(200),
        ..Default::default()
    };
    let events = scan(&server, &["admin", "login", "panel"], options).await;

    let progress: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::Progress { result, .. } => Some(result),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 3);
    for result in progress {
        assert_eq!(result.status, StatusOutcome::TransportError);
        assert_eq!(result.classification, Classification::NotFound);
    }
    assert!(matches!(
        events.last(),
        Some(ScanEvent::Summary { found_panels }) if found_panels.is_empty()
    ));
}

#[tokio::test]
async fn test_redirects_and_errors_are_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/panel"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/panel"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let events = scan(&server, &["/admin", "/login", "/missing"], ScanOptions::default()).await;

    let mut statuses: Vec<(String, StatusOutcome)> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::Progress { result, .. } => Some((result.path.clone(), result.status)),
            _ => None,
        })
        .collect();
    statuses.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        statuses,
        vec![
            ("/admin".to_string(), StatusOutcome::Code(302)),
            ("/login".to_string(), StatusOutcome::Code(403)),
            ("/missing".to_string(), StatusOutcome::Code(404)),
        ]
    );
    assert!(matches!(
        events.last(),
        Some(ScanEvent::Summary { found_panels }) if found_panels.is_empty()
    ));
}

#[tokio::test]
async fn test_user_agent_override_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .and(header("user-agent", "custom-scanner/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let options = ScanOptions {
        user_agent: Some("custom-scanner/1.0".to_string()),
        ..Default::default()
    };
    let events = scan(&server, &["admin"], options).await;

    assert!(matches!(
        events.last(),
        Some(ScanEvent::Summary { found_panels }) if found_panels.len() == 1
    ));
}
