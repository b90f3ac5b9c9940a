use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared between the capture loop and whoever reports on it.
#[derive(Debug, Default)]
pub struct CaptureStats {
    ticks: AtomicU64,
    published: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    overruns: AtomicU64,
}

/// Point-in-time copy of [`CaptureStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub ticks: u64,
    pub published: u64,
    pub skipped: u64,
    pub failed: u64,
    /// Ticks whose work took longer than the capture period.
    pub overruns: u64,
}

impl CaptureStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_overrun(&self) {
        self.overruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
        }
    }
}

/// Effective publish rate over a rolling reporting window.
#[derive(Debug)]
pub(crate) struct RateWindow {
    started: Instant,
    published_at_start: u64,
    overruns_at_start: u64,
    period: Duration,
}

/// Rate and overrun count for one completed reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RateReport {
    pub fps: f64,
    pub overruns: u64,
}

impl RateWindow {
    pub(crate) fn new(period: Duration, now: Instant, stats: &StatsSnapshot) -> Self {
        Self {
            started: now,
            published_at_start: stats.published,
            overruns_at_start: stats.overruns,
            period,
        }
    }

    /// Close the window if `period` has elapsed and start a new one.
    pub(crate) fn roll(&mut self, now: Instant, stats: &StatsSnapshot) -> Option<RateReport> {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < self.period {
            return None;
        }

        let published = stats.published - self.published_at_start;
        let report = RateReport {
            fps: published as f64 / elapsed.as_secs_f64(),
            overruns: stats.overruns - self.overruns_at_start,
        };

        *self = Self::new(self.period, now, stats);
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = CaptureStats::new();
        stats.record_tick();
        stats.record_tick();
        stats.record_published();
        stats.record_skipped();
        stats.record_failed();
        stats.record_overrun();

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                ticks: 2,
                published: 1,
                skipped: 1,
                failed: 1,
                overruns: 1,
            }
        );
    }

    #[test]
    fn test_rate_window_rolls_after_period() {
        let start = Instant::now();
        let mut window = RateWindow::new(Duration::from_secs(5), start, &StatsSnapshot::default());

        let early = StatsSnapshot {
            published: 10,
            ..Default::default()
        };
        assert!(window.roll(start + Duration::from_secs(1), &early).is_none());

        let later = StatsSnapshot {
            published: 150,
            overruns: 3,
            ..Default::default()
        };
        let report = window
            .roll(start + Duration::from_secs(5), &later)
            .expect("window should roll");
        assert!((report.fps - 30.0).abs() < f64::EPSILON);
        assert_eq!(report.overruns, 3);

        let next = StatsSnapshot {
            published: 160,
            overruns: 3,
            ..Default::default()
        };
        let report = window
            .roll(start + Duration::from_secs(10), &next)
            .expect("second window should roll");
        assert!((report.fps - 2.0).abs() < f64::EPSILON);
        assert_eq!(report.overruns, 0);
    }
}
