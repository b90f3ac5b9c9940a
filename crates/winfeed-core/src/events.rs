use std::net::SocketAddr;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::capture::StatsSnapshot;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

pub fn log_capture_started(interval: Duration, jpeg_quality: u8) {
    info!(
        event = "core.capture.loop_started",
        interval_ms = interval.as_millis() as u64,
        jpeg_quality = jpeg_quality
    );
}

/// Periodic effective-rate report. Warns when ticks ran over their period.
pub fn log_capture_rate(fps: f64, interval: Duration, overruns: u64) {
    let target_fps = 1.0 / interval.as_secs_f64();
    if overruns > 0 {
        warn!(
            event = "core.capture.rate_degraded",
            fps = fps,
            target_fps = target_fps,
            overruns = overruns
        );
    } else {
        debug!(
            event = "core.capture.rate",
            fps = fps,
            target_fps = target_fps
        );
    }
}

pub fn log_capture_stopped(summary: &StatsSnapshot, uptime: Duration) {
    let uptime = uptime.as_secs_f64();
    info!(
        event = "core.capture.loop_stopped",
        fps = if uptime > 0.0 { summary.published as f64 / uptime } else { 0.0 },
        ticks = summary.ticks,
        published = summary.published,
        skipped = summary.skipped,
        failed = summary.failed,
        overruns = summary.overruns
    );
}

pub fn log_server_bound(addr: SocketAddr, backlog: u32, max_connections: usize) {
    info!(
        event = "core.http.bind_completed",
        addr = %addr,
        backlog = backlog,
        max_connections = max_connections
    );
}

pub fn log_server_started() {
    info!(event = "core.http.accept_loop_started");
}

pub fn log_server_stopped(accepted: u64) {
    info!(event = "core.http.accept_loop_stopped", accepted = accepted);
}
