// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

use crate::domain::models::target::Target;

/// 将候选路径解析为相对于扫描目标的绝对URL
///
/// 采用标准的基础URL相对解析：以 `/` 开头的路径替换目标的路径部分，
/// 相对路径则相对于目标路径的最后一段拼接。
pub fn resolve_url(target: &Target, path: &str) -> Result<Url, ParseError> {
    target.url().join(path)
}
