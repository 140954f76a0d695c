use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::info_span;

/// Simple counter used to log the amount of leaderboard requests performed.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
    name: &'static str,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Average amount of requests per minute since creation.
    pub fn per_minute(&self) -> f64 {
        per_minute(self.count(), self.start.elapsed())
    }

    /// Log the requests performed so far.
    pub fn log_summary(&self) {
        let _span = info_span!("📊 ", client = self.name).entered();
        tracing::info!(
            "{} requests executed (avg {:.2} req/min)",
            self.count(),
            self.per_minute()
        );
    }
}

fn per_minute(count: u64, elapsed: Duration) -> f64 {
    let elapsed_min = elapsed.as_secs_f64() / 60.0;
    if elapsed_min > 0.0 {
        count as f64 / elapsed_min
    } else {
        0.0
    }
}
