use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide monotonic counters.
#[derive(Debug, Default)]
pub struct Metrics {
    total_requests: AtomicU64,
    successful_payments: AtomicU64,
    rate_limit_hits: AtomicU64,
    fraud_blocks: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub successful_payments: u64,
    pub rate_limit_hits: u64,
    pub fraud_blocks: u64,
}

impl Metrics {
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successful_payments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rate_limit_hit(&self) {
        self.rate_limit_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fraud_block(&self) {
        self.fraud_blocks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_payments: self.successful_payments.load(Ordering::Relaxed),
            rate_limit_hits: self.rate_limit_hits.load(Ordering::Relaxed),
            fraud_blocks: self.fraud_blocks.load(Ordering::Relaxed),
        }
    }
}
