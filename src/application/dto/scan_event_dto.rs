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

use serde::{Serialize, Serializer};

use crate::domain::models::probe_result::{ProbeResult, StatusOutcome};
use crate::domain::models::scan_event::ScanEvent;

/// 探测结果的输出形式
#[derive(Debug, Serialize)]
pub struct ProbeResultDto {
    pub path: String,
    pub url: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusOutcome,
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// A number for received responses, the string "ERROR" otherwise
fn serialize_status<S: Serializer>(status: &StatusOutcome, serializer: S) -> Result<S::Ok, S::Error> {
    match status {
        StatusOutcome::Code(code) => serializer.serialize_u16(*code),
        StatusOutcome::TransportError => serializer.serialize_str("ERROR"),
    }
}

impl From<ProbeResult> for ProbeResultDto {
    fn from(result: ProbeResult) -> Self {
        Self {
            result: result.classification.label(),
            path: result.path,
            url: result.resolved_url,
            status: result.status,
            content_type: result.content_type,
            error: result.error_message,
        }
    }
}

/// 扫描事件的输出形式，每个事件序列化为一行JSON
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanEventDto {
    /// 状态消息
    Message { message: String },
    /// 单个探测的日志行
    Log {
        message: String,
        #[serde(rename = "type")]
        kind: &'static str,
        result: &'static str,
        progress: f64,
    },
    /// 最终汇总
    Complete {
        #[serde(rename = "type")]
        kind: &'static str,
        found_panels: Vec<ProbeResultDto>,
    },
}

impl From<ScanEvent> for ScanEventDto {
    fn from(event: ScanEvent) -> Self {
        match event {
            ScanEvent::Started { target } => ScanEventDto::Message {
                message: format!("Starting scan for: {}\n", target),
            },
            ScanEvent::Progress { result, progress } => {
                let label = result.classification.label();
                ScanEventDto::Log {
                    message: format!(
                        "[{}] {} (Status: {})\n",
                        label, result.resolved_url, result.status
                    ),
                    kind: "log",
                    result: label,
                    progress,
                }
            }
            ScanEvent::Completed { found_count } => ScanEventDto::Message {
                message: format!("Scan completed. Found {} admin panels.\n", found_count),
            },
            ScanEvent::Summary { found_panels } => ScanEventDto::Complete {
                kind: "complete",
                found_panels: found_panels.into_iter().map(ProbeResultDto::from).collect(),
            },
        }
    }
}

impl ScanEventDto {
    /// 序列化为以换行结尾的一行JSON
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
