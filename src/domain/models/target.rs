// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use url::Url;

/// 扫描目标
///
/// 规范化后的基础URL，始终以 `http://` 或 `https://` 开头。
/// 只能通过 `utils::validators::normalize` 构造，扫描开始后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// 规范化后的原始字符串（用于展示）
    normalized: String,
    /// 解析后的URL（用于路径拼接）
    url: Url,
}

impl Target {
    pub(crate) fn new(normalized: String, url: Url) -> Self {
        Self { normalized, url }
    }

    /// 规范化后的字符串形式
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// 解析后的基础URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}
