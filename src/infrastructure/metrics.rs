// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 未启用时不安装记录器，所有指标宏退化为空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.address, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("panelscan_scans_total", "Total number of scans started");
    describe_counter!(
        "panelscan_probes_total",
        "Total number of probes completed, labelled by result"
    );
    describe_counter!(
        "panelscan_panels_found_total",
        "Total number of admin panels found"
    );
    describe_histogram!(
        "panelscan_scan_duration_seconds",
        "Duration of complete scans in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}
