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

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::domain::models::target::Target;

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 未提供URL
    #[error("No URL provided")]
    EmptyUrl,
    /// URL格式无效
    #[error("Invalid URL format")]
    InvalidUrl,
}

/// 目标URL的形状：scheme://host[:port][/path...]
///
/// host 只接受带顶级域名的域名、localhost 或点分十进制 IPv4。
static TARGET_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("target url pattern is a valid regex")
});

/// 判断字符串是否已带有 http/https 协议前缀
fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// 检查URL是否符合目标URL的形状
///
/// 纯函数，不进行任何网络访问
pub fn is_valid_url(url: &str) -> bool {
    TARGET_URL_PATTERN.is_match(url)
}

/// 规范化并验证扫描目标
///
/// 缺少协议前缀时补全 `http://`，然后对补全后的形式做形状检查。
///
/// # 参数
///
/// * `raw` - 用户提供的原始URL字符串
///
/// # 返回值
///
/// * `Ok(Target)` - 规范化后的扫描目标
/// * `Err(ValidationError)` - 输入为空或格式无效
pub fn normalize(raw: &str) -> Result<Target, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    if !is_valid_url(&normalized) {
        return Err(ValidationError::InvalidUrl);
    }

    let url = Url::parse(&normalized).map_err(|_| ValidationError::InvalidUrl)?;
    Ok(Target::new(normalized, url))
}
