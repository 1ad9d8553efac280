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

use panelscan::config::settings::Settings;
use panelscan::domain::repositories::wordlist_repository::WordlistRepository;
use panelscan::domain::services::scan_service::ScanService;
use panelscan::engines::reqwest_prober::ReqwestProber;
use panelscan::engines::traits::Prober;
use panelscan::infrastructure::metrics;
use panelscan::infrastructure::repositories::wordlist_repo_impl::FileWordlistRepository;
use panelscan::presentation::routes;
use panelscan::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting panelscan...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize Prometheus metrics
    metrics::init_metrics(&settings.metrics);

    // 4. Load the wordlist once; an empty list is reported per request
    let wordlist = Arc::new(FileWordlistRepository::new(&settings.wordlist.path));
    if wordlist.load().await.is_empty() {
        warn!(
            "Wordlist {} is empty or missing, scans will be rejected",
            settings.wordlist.path
        );
    }

    // 5. Initialize prober and scan service
    let prober: Arc<dyn Prober> = Arc::new(ReqwestProber::new(&settings.scanner.user_agent)?);
    let service = Arc::new(ScanService::new(prober));

    // 6. Start HTTP server
    let app = routes::routes(service, wordlist, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => warn!("Unable to listen for shutdown signal: {}", err),
    }
}
