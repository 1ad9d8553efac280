// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了扫描的核心实体：
/// - 扫描目标（target）：规范化后的基础URL
/// - 探测结果（probe_result）：单个候选路径的分类结果
/// - 扫描会话（scan_session）：一次扫描的聚合状态
/// - 扫描事件（scan_event）：编排器输出的事件流
pub mod probe_result;
pub mod scan_event;
pub mod scan_session;
pub mod target;
