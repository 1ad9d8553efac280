// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;

/// 候选路径字典仓库特质
///
/// 提供按顺序排列的候选路径，加载结果在进程生命周期内缓存。
/// 底层来源不可用时返回空序列，由调用方决定是否视为致命错误。
#[async_trait]
pub trait WordlistRepository: Send + Sync {
    /// 加载候选路径
    async fn load(&self) -> Arc<[String]>;
}
