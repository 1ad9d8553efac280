// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use tracing::error;

use crate::domain::services::scan_service::ScanError;
use crate::utils::validators::ValidationError;

/// 对外暴露的通用内部错误消息
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// 应用错误类型
///
/// 封装请求处理过程中可预期的错误。客户端错误与扫描错误原样返回；
/// 意外失败由 `handle_panic` 统一处理，只记录日志并返回通用消息。
#[derive(Debug, Error)]
pub enum AppError {
    /// 目标URL缺失或无效
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 请求体无法解析
    #[error("{0}")]
    BadRequest(String),
    /// 扫描无法开始
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Scan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Scan(e) => {
                error!("Scan could not start: {}", e);
                e.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

/// 顶层panic处理
///
/// 处理器中逃逸的panic在这里记录并转换为通用的500响应
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("An error occurred: handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
