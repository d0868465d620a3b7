use crate::config::DeliveryPolicy;
use crate::webhooks::AttemptResult;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDirective {
    Delivered,
    RetryAfter(Duration),
    Exhausted,
}

pub fn attempt_limit(policy: &DeliveryPolicy) -> u32 {
    policy.max_attempts.max(1)
}

/// Delay after the given 1-based attempt: base, 2*base, 4*base, ...
pub fn backoff_delay(policy: &DeliveryPolicy, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    policy.base_delay.saturating_mul(1u32 << exponent)
}

pub fn classify_attempt(result: &AttemptResult, attempt: u32, policy: &DeliveryPolicy) -> RetryDirective {
    if result.is_acknowledged() {
        RetryDirective::Delivered
    } else if attempt >= attempt_limit(policy) {
        RetryDirective::Exhausted
    } else {
        RetryDirective::RetryAfter(backoff_delay(policy, attempt))
    }
}
