// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 扫描服务（scan_service）：扫描编排器，负责并发派发探测并汇总结果
pub mod scan_service;
