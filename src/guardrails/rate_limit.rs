use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

/// Sliding window of request timestamps per principal.
///
/// Eviction, the threshold check and the append happen under one lock, so
/// concurrent requests from the same principal cannot jointly exceed
/// `max_requests`.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    windows: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, principal: &str) -> bool {
        self.check_at(principal, Utc::now())
    }

    /// Returns `true` and records `now` if the principal is under the limit.
    pub fn check_at(&self, principal: &str, now: DateTime<Utc>) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let timestamps = windows.entry(principal.to_string()).or_default();

        let cutoff = now - self.window;
        while timestamps.front().is_some_and(|t| *t <= cutoff) {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            return false;
        }
        timestamps.push_back(now);
        true
    }

    pub fn in_window(&self, principal: &str) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(principal)
            .map_or(0, VecDeque::len)
    }
}
