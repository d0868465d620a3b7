use crate::domain::event::StatusChanged;
use std::time::Duration;

pub mod http;

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Acknowledged { status_code: u16 },
    Rejected { status_code: u16 },
    TimedOut,
    TransportError(String),
}

impl AttemptResult {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, AttemptResult::Acknowledged { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            AttemptResult::Acknowledged { status_code } => format!("HTTP_{}", status_code),
            AttemptResult::Rejected { status_code } => format!("HTTP_{}", status_code),
            AttemptResult::TimedOut => "TIMEOUT".to_string(),
            AttemptResult::TransportError(e) => format!("NETWORK_ERROR: {}", e),
        }
    }
}

#[async_trait::async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn deliver(&self, target_url: &str, event: &StatusChanged, timeout: Duration) -> AttemptResult;
}
