// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::settings::Settings;
use crate::domain::repositories::wordlist_repository::WordlistRepository;
use crate::domain::services::scan_service::ScanService;
use crate::presentation::errors::handle_panic;
use crate::presentation::handlers::scan_handler;

/// 创建应用路由
///
/// # 参数
///
/// * `service` - 扫描服务
/// * `wordlist` - 候选路径字典
/// * `settings` - 应用配置
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(
    service: Arc<ScanService>,
    wordlist: Arc<dyn WordlistRepository>,
    settings: Arc<Settings>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/scan", post(scan_handler::scan))
        .layer(Extension(service))
        .layer(Extension(wordlist))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
