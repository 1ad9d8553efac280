// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::probe_result::ProbeResult;
use crate::domain::models::target::Target;

/// 扫描事件
///
/// 编排器按顺序输出：一个 `Started`，每个候选路径一个 `Progress`（按完成顺序），
/// 最后依次是一个 `Completed` 和一个 `Summary`。
/// 事件本身不绑定任何序列化格式。
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// 扫描已开始
    Started { target: Target },
    /// 一个探测已完成
    Progress { result: ProbeResult, progress: f64 },
    /// 全部探测已完成
    Completed { found_count: usize },
    /// 最终汇总，包含全部 `Found` 结果
    Summary { found_panels: Vec<ProbeResult> },
}

impl ScanEvent {
    /// 是否为扫描的最后一个事件
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanEvent::Summary { .. })
    }
}
