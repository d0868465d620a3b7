use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    PaymentAdmitted,
    PaymentRejected,
    PaymentInvalid,
    SettlementRequested,
    SettlementStarted,
    PaymentSettled,
    SettlementFailed,
    WebhookRegistered,
    WebhookDelivered,
    WebhookFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::PaymentAdmitted => "payment_admitted",
            AuditAction::PaymentRejected => "payment_rejected",
            AuditAction::PaymentInvalid => "payment_invalid",
            AuditAction::SettlementRequested => "settlement_requested",
            AuditAction::SettlementStarted => "settlement_started",
            AuditAction::PaymentSettled => "payment_settled",
            AuditAction::SettlementFailed => "settlement_failed",
            AuditAction::WebhookRegistered => "webhook_registered",
            AuditAction::WebhookDelivered => "webhook_delivered",
            AuditAction::WebhookFailed => "webhook_failed",
        }
    }
}

/// Immutable once appended. `principal` is `None` for system actions.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub principal: Option<String>,
    pub action: AuditAction,
    pub detail: serde_json::Value,
}
