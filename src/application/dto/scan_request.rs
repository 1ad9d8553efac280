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

use serde::{Deserialize, Serialize};

use crate::config::settings::ScannerSettings;
use crate::domain::services::scan_service::ScanOptions;

/// 扫描请求数据传输对象
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScanRequestDto {
    /// 要扫描的目标URL
    pub url: Option<String>,
    /// 客户端携带的扫描配置，未识别的字段会被忽略
    pub config: Option<ScanConfigDto>,
}

/// 客户端扫描配置
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScanConfigDto {
    /// 单次探测超时（毫秒）
    pub timeout: Option<u64>,
    /// 并发探测数
    pub threads: Option<usize>,
    /// 自定义 User-Agent
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
}

impl ScanRequestDto {
    /// 将客户端配置与服务端默认值合并为扫描选项
    ///
    /// 超出服务端上限的值会被截断
    pub fn scan_options(&self, scanner: &ScannerSettings) -> ScanOptions {
        let config = self.config.as_ref();
        ScanOptions {
            concurrency: config
                .and_then(|c| c.threads)
                .map(|t| scanner.clamp_concurrency(t))
                .unwrap_or(scanner.concurrency),
            probe_timeout: config
                .and_then(|c| c.timeout)
                .map(|t| scanner.clamp_timeout(t))
                .unwrap_or_else(|| scanner.timeout()),
            user_agent: config
                .and_then(|c| c.user_agent.as_deref())
                .map(str::trim)
                .filter(|ua| !ua.is_empty())
                .map(str::to_string),
        }
    }
}
