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
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use std::error::Error as StdError;
use tracing::debug;

use crate::domain::models::probe_result::ProbeResult;
use crate::engines::traits::{ProbeError, ProbeRequest, Prober};
use crate::utils::url_utils::resolve_url;

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = "AdminScanner/2.0";

/// 探测引擎
///
/// 基于reqwest实现的单次GET探测，不跟随重定向
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    /// 创建新的探测器
    ///
    /// # 参数
    ///
    /// * `user_agent` - 默认 User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestProber)` - 探测器实例
    /// * `Err(ProbeError)` - HTTP客户端构建失败
    pub fn new(user_agent: &str) -> Result<Self, ProbeError> {
        // One shared client for connection pooling; timeouts are applied per request
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: &ProbeRequest<'_>, url: reqwest::Url) -> Result<(u16, String), ProbeError> {
        let mut builder = self.client.get(url).timeout(request.timeout);
        if let Some(agent) = request.user_agent {
            if let Ok(value) = HeaderValue::from_str(agent) {
                builder = builder.header(USER_AGENT, value);
            }
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(request.timeout)
            } else {
                ProbeError::RequestFailed(e)
            }
        })?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        Ok((status_code, content_type))
    }
}

/// 生成包含完整错误链的描述
fn describe_error(err: &ProbeError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, request: ProbeRequest<'_>) -> ProbeResult {
        let url = match resolve_url(request.target, request.path) {
            Ok(url) => url,
            Err(e) => {
                // Nothing was sent; keep the naive concatenation for display
                let display = format!("{}{}", request.target, request.path);
                return ProbeResult::transport_error(
                    request.path,
                    display,
                    describe_error(&ProbeError::InvalidUrl(e)),
                );
            }
        };
        let resolved = url.to_string();

        match self.send(&request, url).await {
            Ok((status_code, content_type)) => {
                debug!("{} -> {}", resolved, status_code);
                ProbeResult::response(request.path, resolved, status_code, content_type)
            }
            Err(e) => {
                let message = describe_error(&e);
                debug!("{} -> ERROR ({})", resolved, message);
                ProbeResult::transport_error(request.path, resolved, message)
            }
        }
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_prober_test.rs"]
mod tests;
