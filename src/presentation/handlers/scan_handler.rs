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

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Extension, Json},
    http::header,
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    application::dto::{scan_event_dto::ScanEventDto, scan_request::ScanRequestDto},
    config::settings::Settings,
    domain::{
        repositories::wordlist_repository::WordlistRepository,
        services::scan_service::ScanService,
    },
    presentation::errors::AppError,
    utils::validators::normalize,
};

/// 输出流的内容类型
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// 处理扫描请求
///
/// 校验目标、加载字典后开始扫描，并以换行分隔的JSON逐行输出扫描事件
///
/// # 参数
///
/// * `service` - 扫描服务
/// * `wordlist` - 候选路径字典
/// * `settings` - 应用配置
/// * `payload` - 扫描请求数据
///
/// # 错误
///
/// 以下情况在开始扫描之前返回错误响应：
/// - 请求体无法解析或缺少URL（400）
/// - URL格式无效（400）
/// - 字典为空或不可用（500）
pub async fn scan(
    Extension(service): Extension<Arc<ScanService>>,
    Extension(wordlist): Extension<Arc<dyn WordlistRepository>>,
    Extension(settings): Extension<Arc<Settings>>,
    payload: Result<Json<ScanRequestDto>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let target = normalize(payload.url.as_deref().unwrap_or_default())?;
    let candidates = wordlist.load().await;
    let options = payload.scan_options(&settings.scanner);

    info!(
        "Scan requested for {} ({} candidates, concurrency {})",
        target,
        candidates.len(),
        options.concurrency
    );
    let events = service.run_scan(target, candidates, options)?;

    let lines = events.map(|event| {
        ScanEventDto::from(event).to_line().inspect_err(|e| {
            error!("Failed to serialize scan event: {}", e);
        })
    });

    Ok((
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
        .into_response())
}
