// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的数据来源抽象，具体实现由基础设施层提供：
/// - 字典仓库（wordlist_repository）：提供待探测的候选路径
pub mod wordlist_repository;
