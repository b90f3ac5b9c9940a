use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::encoder::FrameEncoder;
use super::errors::CaptureError;
use super::stats::{CaptureStats, RateWindow, StatsSnapshot};
use super::target::{CaptureTarget, Observation};
use crate::config::CaptureConfig;
use crate::events;
use crate::frame::FrameStore;

/// How often the effective capture rate is reported.
const RATE_REPORT_PERIOD: Duration = Duration::from_secs(5);

/// Why a tick produced no frame without anything going wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Minimized,
    ZeroArea { width: u32, height: u32 },
}

/// Result of one capture tick.
#[derive(Debug)]
pub enum TickOutcome {
    Published { sequence: u64, bytes: usize },
    Skipped(SkipReason),
    /// Capture or encode failed; the previously published frame stays current.
    Failed(CaptureError),
    /// The target window is gone. Terminal.
    WindowClosed,
}

/// Periodic producer: observes the target, encodes, and publishes into the
/// [`FrameStore`]. It is the store's only writer.
pub struct CaptureLoop<T: CaptureTarget> {
    worker: TickWorker<T>,
    stats: Arc<CaptureStats>,
    interval: Duration,
    error_backoff: Duration,
}

/// The part of the loop that runs on the blocking pool.
struct TickWorker<T> {
    target: T,
    encoder: FrameEncoder,
    store: FrameStore,
}

impl<T: CaptureTarget> TickWorker<T> {
    fn tick(&mut self) -> TickOutcome {
        let observation = match self.target.observe() {
            Ok(observation) => observation,
            Err(e) => return TickOutcome::Failed(e),
        };

        let image = match observation {
            Observation::Closed => return TickOutcome::WindowClosed,
            Observation::Minimized => return TickOutcome::Skipped(SkipReason::Minimized),
            Observation::ZeroArea { width, height } => {
                return TickOutcome::Skipped(SkipReason::ZeroArea { width, height });
            }
            Observation::Pixels(image) => image,
        };

        match self.encoder.encode(image) {
            Ok(frame) => {
                let bytes = frame.len();
                let sequence = self.store.publish(frame);
                TickOutcome::Published { sequence, bytes }
            }
            Err(e) => TickOutcome::Failed(e),
        }
    }

    /// A panic inside a platform capture call costs one tick, not the loop.
    fn tick_guarded(&mut self) -> TickOutcome {
        std::panic::catch_unwind(AssertUnwindSafe(|| self.tick())).unwrap_or_else(|_| {
            TickOutcome::Failed(CaptureError::CaptureFailed {
                message: "capture panicked".to_string(),
            })
        })
    }
}

impl<T: CaptureTarget> CaptureLoop<T> {
    pub fn new(target: T, store: FrameStore, config: &CaptureConfig) -> Self {
        Self {
            worker: TickWorker {
                target,
                encoder: FrameEncoder::new(config.jpeg_quality),
                store,
            },
            stats: Arc::new(CaptureStats::new()),
            interval: config.interval(),
            error_backoff: config.error_backoff(),
        }
    }

    pub fn stats(&self) -> Arc<CaptureStats> {
        self.stats.clone()
    }

    /// Run a single tick on the current thread.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.worker.tick_guarded();
        record_outcome(&self.stats, &outcome);
        outcome
    }

    /// Tick every `interval` until `shutdown` is cancelled or the window closes.
    ///
    /// Each tick's work runs on the blocking pool. The ticker only sleeps
    /// for what is left of the period; ticks that overrun are counted and
    /// the ones they cover are skipped rather than bunched up. A closed
    /// window cancels `shutdown` so the rest of the process stops too.
    pub async fn run(self, shutdown: CancellationToken) -> StatsSnapshot {
        let CaptureLoop {
            mut worker,
            stats,
            interval,
            error_backoff,
        } = self;

        events::log_capture_started(interval, worker.encoder.quality());

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let loop_started = Instant::now();
        let mut rate = RateWindow::new(RATE_REPORT_PERIOD, loop_started, &stats.snapshot());

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let started = Instant::now();
            let joined = tokio::task::spawn_blocking(move || {
                let outcome = worker.tick_guarded();
                (worker, outcome)
            })
            .await;

            let outcome = match joined {
                Ok((returned, outcome)) => {
                    worker = returned;
                    outcome
                }
                Err(e) => {
                    error!(event = "core.capture.worker_lost", error = %e);
                    shutdown.cancel();
                    break;
                }
            };

            let elapsed = started.elapsed();
            record_outcome(&stats, &outcome);
            if elapsed > interval {
                stats.record_overrun();
                debug!(
                    event = "core.capture.tick_overrun",
                    elapsed_ms = elapsed.as_millis() as u64,
                    interval_ms = interval.as_millis() as u64,
                    missed_ticks = (elapsed.as_nanos() / interval.as_nanos()) as u64
                );
            }

            match outcome {
                TickOutcome::WindowClosed => {
                    shutdown.cancel();
                    break;
                }
                TickOutcome::Failed(_) => {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(error_backoff) => {}
                    }
                }
                TickOutcome::Published { .. } | TickOutcome::Skipped(_) => {}
            }

            if let Some(report) = rate.roll(Instant::now(), &stats.snapshot()) {
                events::log_capture_rate(report.fps, interval, report.overruns);
            }
        }

        let summary = stats.snapshot();
        events::log_capture_stopped(&summary, loop_started.elapsed());
        summary
    }
}

fn record_outcome(stats: &CaptureStats, outcome: &TickOutcome) {
    stats.record_tick();
    match outcome {
        TickOutcome::Published { .. } => stats.record_published(),
        TickOutcome::Skipped(reason) => {
            stats.record_skipped();
            debug!(event = "core.capture.tick_skipped", reason = ?reason);
        }
        TickOutcome::Failed(e) => {
            stats.record_failed();
            warn!(event = "core.capture.tick_failed", error = %e);
        }
        TickOutcome::WindowClosed => {
            warn!(event = "core.capture.window_closed");
        }
    }
}
