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

use std::fmt;

/// 探测结果的状态
///
/// 收到HTTP响应时为状态码，传输层失败时为 `TransportError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 收到的HTTP状态码
    Code(u16),
    /// 传输层错误（超时、连接失败、DNS失败等）
    TransportError,
}

impl fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusOutcome::Code(code) => write!(f, "{}", code),
            StatusOutcome::TransportError => f.write_str("ERROR"),
        }
    }
}

/// 探测分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 发现管理面板（状态码 200）
    Found,
    /// 其他任何状态码或传输错误
    NotFound,
}

impl Classification {
    /// 根据探测状态推导分类，当且仅当状态码为 200 时为 `Found`
    pub fn from_outcome(outcome: StatusOutcome) -> Self {
        match outcome {
            StatusOutcome::Code(200) => Classification::Found,
            _ => Classification::NotFound,
        }
    }

    /// 输出流中使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Found => "OK",
            Classification::NotFound => "NO",
        }
    }
}

/// 单个候选路径的探测结果
///
/// 每个候选路径恰好生成一次，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// 候选路径（与字典中的条目一致）
    pub path: String,
    /// 解析后的完整URL
    pub resolved_url: String,
    /// 状态码或传输错误标记
    pub status: StatusOutcome,
    /// 分类结果
    pub classification: Classification,
    /// 响应的 Content-Type，缺失时为空字符串
    pub content_type: Option<String>,
    /// 传输错误描述
    pub error_message: Option<String>,
}

impl ProbeResult {
    /// 根据收到的HTTP响应创建结果
    pub fn response(
        path: impl Into<String>,
        resolved_url: impl Into<String>,
        status_code: u16,
        content_type: impl Into<String>,
    ) -> Self {
        let status = StatusOutcome::Code(status_code);
        Self {
            path: path.into(),
            resolved_url: resolved_url.into(),
            status,
            classification: Classification::from_outcome(status),
            content_type: Some(content_type.into()),
            error_message: None,
        }
    }

    /// 根据传输层错误创建结果
    pub fn transport_error(
        path: impl Into<String>,
        resolved_url: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            resolved_url: resolved_url.into(),
            status: StatusOutcome::TransportError,
            classification: Classification::NotFound,
            content_type: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn is_found(&self) -> bool {
        self.classification == Classification::Found
    }
}
