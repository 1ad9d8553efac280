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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::probe_result::ProbeResult;
use crate::domain::models::target::Target;

/// 默认单次探测超时
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 探测错误类型
///
/// 仅在探测器内部使用，最终都会被转换为 `StatusOutcome::TransportError`
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// URL无法解析
    #[error("Invalid candidate URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 单次探测的参数
#[derive(Debug, Clone)]
pub struct ProbeRequest<'a> {
    /// 扫描目标
    pub target: &'a Target,
    /// 候选路径
    pub path: &'a str,
    /// 超时时间
    pub timeout: Duration,
    /// 覆盖默认 User-Agent
    pub user_agent: Option<&'a str>,
}

impl<'a> ProbeRequest<'a> {
    pub fn new(target: &'a Target, path: &'a str) -> Self {
        Self {
            target,
            path,
            timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<&'a str>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// 路径探测器特质
///
/// 对一个候选路径发起一次请求并返回分类结果。
/// 实现必须把所有传输层失败编码进 `ProbeResult`，不能向外传播错误。
#[async_trait]
pub trait Prober: Send + Sync {
    /// 执行探测
    async fn probe(&self, request: ProbeRequest<'_>) -> ProbeResult;

    /// 探测器名称
    fn name(&self) -> &'static str;
}
