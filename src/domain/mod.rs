// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：扫描目标、探测结果、会话和事件
/// - 仓库接口（repositories）：候选路径字典的抽象
/// - 服务（services）：扫描编排
///
/// 领域层不依赖于HTTP框架或具体的序列化格式。
pub mod models;
pub mod repositories;
pub mod services;
