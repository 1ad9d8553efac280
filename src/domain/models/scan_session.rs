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

use uuid::Uuid;

use crate::domain::models::probe_result::ProbeResult;
use crate::domain::models::target::Target;

/// 扫描会话
///
/// 一次完整扫描的聚合状态。只由扫描编排器持有和修改，
/// 在输出最终汇总后丢弃，不做持久化。
#[derive(Debug)]
pub struct ScanSession {
    /// 会话唯一标识符（仅用于日志关联）
    id: Uuid,
    /// 扫描目标
    target: Target,
    /// 候选路径总数
    total: usize,
    /// 已完成的探测数，单调递增
    completed: usize,
    /// 按完成顺序记录的 `Found` 结果
    found: Vec<ProbeResult>,
    /// 是否已结束
    finished: bool,
}

impl ScanSession {
    /// 创建新的扫描会话
    ///
    /// # 参数
    ///
    /// * `target` - 扫描目标
    /// * `total` - 候选路径总数，必须大于 0
    pub fn new(target: Target, total: usize) -> Self {
        debug_assert!(total > 0, "a scan session needs at least one candidate");
        Self {
            id: Uuid::new_v4(),
            target,
            total,
            completed: 0,
            found: Vec::new(),
            finished: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn found(&self) -> &[ProbeResult] {
        &self.found
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 当前进度百分比，已完成数等于总数时恰好为 100
    pub fn progress(&self) -> f64 {
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// 记录一个已完成的探测结果
    ///
    /// 递增完成计数，`Found` 结果追加到发现列表
    ///
    /// # 返回值
    ///
    /// 记录之后的进度百分比
    pub fn record(&mut self, result: &ProbeResult) -> f64 {
        debug_assert!(self.completed < self.total, "more results than candidates");
        self.completed += 1;
        if result.is_found() {
            self.found.push(result.clone());
        }
        self.progress()
    }

    /// 所有候选路径是否都已完成
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    /// 结束会话并取出发现列表
    pub fn finish(&mut self) -> Vec<ProbeResult> {
        self.finished = true;
        std::mem::take(&mut self.found)
    }
}
