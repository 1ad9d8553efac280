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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、扫描器、字典和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 扫描器配置
    pub scanner: ScannerSettings,
    /// 字典配置
    pub wordlist: WordlistSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 扫描器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerSettings {
    /// 默认并发探测数
    pub concurrency: usize,
    /// 单次扫描允许的最大并发探测数
    pub max_concurrency: usize,
    /// 默认单次探测超时（毫秒）
    pub timeout_ms: u64,
    /// 单次扫描允许的最大探测超时（毫秒）
    pub max_timeout_ms: u64,
    /// 默认 User-Agent
    pub user_agent: String,
}

impl ScannerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 将请求中的并发数限制在 1..=max_concurrency
    pub fn clamp_concurrency(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_concurrency.max(1))
    }

    /// 将请求中的超时限制在 1..=max_timeout_ms 毫秒
    pub fn clamp_timeout(&self, requested_ms: u64) -> Duration {
        Duration::from_millis(requested_ms.clamp(1, self.max_timeout_ms.max(1)))
    }
}

/// 字典配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WordlistSettings {
    /// 字典文件路径
    pub path: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub address: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PANELSCAN__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PANELSCAN").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Default scanner settings
            .set_default("scanner.concurrency", 20)?
            .set_default("scanner.max_concurrency", 100)?
            .set_default("scanner.timeout_ms", 5000)?
            .set_default("scanner.max_timeout_ms", 60000)?
            .set_default("scanner.user_agent", "AdminScanner/2.0")?
            // Default wordlist settings
            .set_default("wordlist.path", "wordlists/admin_paths.txt")?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.address", "0.0.0.0:9000")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            scanner: ScannerSettings {
                concurrency: 20,
                max_concurrency: 100,
                timeout_ms: 5000,
                max_timeout_ms: 60000,
                user_agent: "AdminScanner/2.0".to_string(),
            },
            wordlist: WordlistSettings {
                path: "wordlists/admin_paths.txt".to_string(),
            },
            metrics: MetricsSettings {
                enabled: false,
                address: "0.0.0.0:9000".to_string(),
            },
        }
    }
}
