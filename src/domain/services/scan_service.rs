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

use futures::{FutureExt, Stream};
use metrics::{counter, histogram};
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::models::probe_result::ProbeResult;
use crate::domain::models::scan_event::ScanEvent;
use crate::domain::models::scan_session::ScanSession;
use crate::domain::models::target::Target;
use crate::engines::traits::{ProbeRequest, Prober, DEFAULT_PROBE_TIMEOUT};
use crate::utils::url_utils::resolve_url;

/// 默认并发探测数
pub const DEFAULT_CONCURRENCY: usize = 20;

/// 事件通道容量，消费者停止拉取时编排器在此处等待
const EVENT_BUFFER: usize = 64;

/// 未能完成的探测任务对应的错误描述
const LOST_PROBE_MESSAGE: &str = "probe task was cancelled";

/// 扫描错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// 没有候选路径
    #[error("Admin paths wordlist is empty or not found")]
    NoCandidates,
}

/// 单次扫描的选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 同时进行中的探测上限
    pub concurrency: usize,
    /// 单次探测超时
    pub probe_timeout: Duration,
    /// 覆盖探测器默认 User-Agent
    pub user_agent: Option<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: None,
        }
    }
}

/// 扫描事件流
///
/// 由 `ScanService::run_scan` 返回，每次调用产生一次全新的扫描。
/// 丢弃该流会中止仍在进行中的探测。
pub struct ScanStream {
    receiver: mpsc::Receiver<ScanEvent>,
}

impl Stream for ScanStream {
    type Item = ScanEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// 扫描服务
///
/// 扫描编排器：为每个候选路径派发一次探测，在有界并发下执行，
/// 按完成顺序汇总结果并输出事件流。
pub struct ScanService {
    prober: Arc<dyn Prober>,
}

impl ScanService {
    /// 创建新的扫描服务实例
    ///
    /// # 参数
    ///
    /// * `prober` - 路径探测器
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// 开始一次扫描
    ///
    /// 候选路径为空时立即失败，不发起任何探测。
    ///
    /// # 参数
    ///
    /// * `target` - 规范化后的扫描目标
    /// * `candidates` - 按字典顺序排列的候选路径
    /// * `options` - 并发、超时等选项
    ///
    /// # 返回值
    ///
    /// * `Ok(ScanStream)` - 扫描事件流
    /// * `Err(ScanError)` - 扫描未能开始
    pub fn run_scan(
        &self,
        target: Target,
        candidates: Arc<[String]>,
        options: ScanOptions,
    ) -> Result<ScanStream, ScanError> {
        if candidates.is_empty() {
            return Err(ScanError::NoCandidates);
        }

        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        let session = ScanSession::new(target, candidates.len());
        let span = info_span!(
            "scan",
            scan_id = %session.id(),
            target = %session.target()
        );

        tokio::spawn(
            coordinate(self.prober.clone(), session, candidates, options, sender).instrument(span),
        );

        Ok(ScanStream { receiver })
    }
}

/// 扫描协调循环
///
/// 会话状态只在这里修改，探测任务只返回结果
async fn coordinate(
    prober: Arc<dyn Prober>,
    mut session: ScanSession,
    candidates: Arc<[String]>,
    options: ScanOptions,
    sender: mpsc::Sender<ScanEvent>,
) {
    let started_at = Instant::now();
    let concurrency = options.concurrency.max(1);
    info!(
        total = session.total(),
        concurrency,
        timeout_ms = options.probe_timeout.as_millis() as u64,
        "Starting scan"
    );
    counter!("panelscan_scans_total").increment(1);

    let started = ScanEvent::Started {
        target: session.target().clone(),
    };
    if sender.send(started).await.is_err() {
        warn!("Scan consumer went away before the scan started");
        return;
    }

    let target = Arc::new(session.target().clone());
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let user_agent: Option<Arc<str>> = options.user_agent.map(Arc::from);
    let mut tasks = JoinSet::new();

    // Every candidate is submitted up front; the semaphore queues the excess
    for (index, path) in candidates.iter().enumerate() {
        let prober = prober.clone();
        let target = target.clone();
        let semaphore = semaphore.clone();
        let user_agent = user_agent.clone();
        let path = path.clone();
        let timeout = options.probe_timeout;

        tasks.spawn(async move {
            // The semaphore lives as long as this scan and is never closed.
            // Without a permit the candidate is left to `settle_lost_probes`.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (index, None);
            };
            let result = probe_isolated(prober, &target, &path, timeout, user_agent.as_deref()).await;
            (index, Some(result))
        });
    }

    let mut completed = vec![false; candidates.len()];

    while let Some(joined) = tasks.join_next().await {
        let result = match joined {
            Ok((index, Some(result))) => {
                completed[index] = true;
                result
            }
            Ok((_, None)) => continue,
            Err(e) => {
                // Only reachable on runtime shutdown; settled after the loop
                error!("Probe task failed to join: {}", e);
                continue;
            }
        };

        if !emit_progress(&mut session, &sender, result).await {
            warn!(
                completed = session.completed(),
                total = session.total(),
                "Scan consumer went away, aborting remaining probes"
            );
            tasks.abort_all();
            return;
        }
    }

    if !settle_lost_probes(&mut session, &sender, &target, &candidates, &completed).await {
        return;
    }

    let found_panels = session.finish();
    let elapsed = started_at.elapsed();
    histogram!("panelscan_scan_duration_seconds").record(elapsed.as_secs_f64());
    info!(
        found = found_panels.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Scan completed"
    );

    let completed_event = ScanEvent::Completed {
        found_count: found_panels.len(),
    };
    if sender.send(completed_event).await.is_err() {
        return;
    }
    let _ = sender.send(ScanEvent::Summary { found_panels }).await;
}

/// 为没有产出结果的候选路径补发错误结果
///
/// 保证每个候选路径恰好对应一个进度事件。消费者仍在时返回 true。
async fn settle_lost_probes(
    session: &mut ScanSession,
    sender: &mpsc::Sender<ScanEvent>,
    target: &Target,
    candidates: &[String],
    completed: &[bool],
) -> bool {
    for (path, _) in candidates.iter().zip(completed).filter(|(_, done)| !**done) {
        let result = ProbeResult::transport_error(
            path.clone(),
            display_url(target, path),
            LOST_PROBE_MESSAGE,
        );
        if !emit_progress(session, sender, result).await {
            return false;
        }
    }
    true
}

/// 记录一个结果并输出进度事件
///
/// # 返回值
///
/// 消费者仍在时返回 true
async fn emit_progress(
    session: &mut ScanSession,
    sender: &mpsc::Sender<ScanEvent>,
    result: ProbeResult,
) -> bool {
    let progress = session.record(&result);
    counter!(
        "panelscan_probes_total",
        "result" => result.classification.label()
    )
    .increment(1);
    if result.is_found() {
        counter!("panelscan_panels_found_total").increment(1);
        info!(url = %result.resolved_url, "Admin panel found");
    } else {
        debug!(url = %result.resolved_url, status = %result.status, "Probe completed");
    }

    sender
        .send(ScanEvent::Progress { result, progress })
        .await
        .is_ok()
}

/// 执行一次探测，并把探测器内部的panic转换为错误结果
async fn probe_isolated(
    prober: Arc<dyn Prober>,
    target: &Target,
    path: &str,
    timeout: Duration,
    user_agent: Option<&str>,
) -> ProbeResult {
    let request = ProbeRequest::new(target, path)
        .with_timeout(timeout)
        .with_user_agent(user_agent);

    match AssertUnwindSafe(prober.probe(request)).catch_unwind().await {
        Ok(result) => result,
        Err(_) => {
            error!(path, prober = prober.name(), "Prober panicked");
            ProbeResult::transport_error(path, display_url(target, path), "internal probe failure")
        }
    }
}

fn display_url(target: &Target, path: &str) -> String {
    resolve_url(target, path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("{}{}", target, path))
}

#[cfg(test)]
#[path = "scan_service_test.rs"]
mod tests;
