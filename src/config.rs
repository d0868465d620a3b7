use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DENYLIST: &[&str] = &["ACC-DENY-0001", "ACC-DENY-0002", "ACC-MULE-7731"];

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub guardrails: GuardrailLimits,
    pub delivery: DeliveryPolicy,
}

#[derive(Debug, Clone)]
pub struct GuardrailLimits {
    pub rate_limit_window: chrono::Duration,
    pub rate_limit_max_requests: usize,
    pub fraud_amount_ceiling: Decimal,
    pub denylisted_accounts: Vec<String>,
}

impl Default for GuardrailLimits {
    fn default() -> Self {
        Self {
            rate_limit_window: chrono::Duration::seconds(60),
            rate_limit_max_requests: 10,
            fraud_amount_ceiling: Decimal::from(10_000),
            denylisted_accounts: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Bounded retry settings for webhook delivery.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(3),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let guardrail_defaults = GuardrailLimits::default();
        let delivery_defaults = DeliveryPolicy::default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            guardrails: GuardrailLimits {
                rate_limit_window: env_parse::<i64>("RATE_LIMIT_WINDOW_SECS")
                    .map(chrono::Duration::seconds)
                    .unwrap_or(guardrail_defaults.rate_limit_window),
                rate_limit_max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS")
                    .unwrap_or(guardrail_defaults.rate_limit_max_requests),
                fraud_amount_ceiling: std::env::var("FRAUD_AMOUNT_CEILING")
                    .ok()
                    .and_then(|s| Decimal::from_str(&s).ok())
                    .unwrap_or(guardrail_defaults.fraud_amount_ceiling),
                denylisted_accounts: std::env::var("FRAUD_DENYLIST")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or(guardrail_defaults.denylisted_accounts),
            },
            delivery: DeliveryPolicy {
                max_attempts: env_parse("WEBHOOK_MAX_ATTEMPTS").unwrap_or(delivery_defaults.max_attempts),
                base_delay: env_parse::<u64>("WEBHOOK_BASE_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(delivery_defaults.base_delay),
                attempt_timeout: env_parse::<u64>("WEBHOOK_TIMEOUT_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(delivery_defaults.attempt_timeout),
            },
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}
