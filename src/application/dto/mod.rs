// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义扫描请求和输出事件的线上格式，
/// 领域模型不依赖任何具体的序列化方式
pub mod scan_event_dto;
pub mod scan_request;
