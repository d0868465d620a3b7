use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub target_currency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Settling,
    Settled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Settling => "settling",
            PaymentStatus::Settled => "settled",
        }
    }
}

/// Result of a successful guardrail pass, attached to the ledger record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    pub fx_rate: Option<Decimal>,
    pub converted_amount: Decimal,
    pub target_currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub payment_id: String,
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub currency: String,
    pub target_currency: String,
    pub fx_rate: Option<Decimal>,
    pub converted_amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub settlement_time: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn new(payment_id: String, req: &PaymentRequest, enrichment: Enrichment) -> Self {
        Self {
            payment_id,
            from_account: req.from_account.clone(),
            to_account: req.to_account.clone(),
            amount: req.amount,
            currency: req.currency.clone(),
            target_currency: enrichment.target_currency,
            fx_rate: enrichment.fx_rate,
            converted_amount: enrichment.converted_amount,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            settlement_time: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusView {
    pub payment_id: String,
    pub status: PaymentStatus,
    pub settlement_time: Option<DateTime<Utc>>,
    pub amount: Decimal,
    pub currency: String,
    pub target_currency: String,
    pub converted_amount: Decimal,
    pub fx_rate: Option<Decimal>,
}

impl From<&Payment> for PaymentStatusView {
    fn from(p: &Payment) -> Self {
        Self {
            payment_id: p.payment_id.clone(),
            status: p.status,
            settlement_time: p.settlement_time,
            amount: p.amount,
            currency: p.currency.clone(),
            target_currency: p.target_currency.clone(),
            converted_amount: p.converted_amount,
            fx_rate: p.fx_rate,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterWebhookRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub payment_id: String,
    pub url: String,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum BatchItemResult {
    Accepted { index: usize, payment: PaymentStatusView },
    Rejected { index: usize, error: ErrorPayload },
}

impl BatchItemResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BatchItemResult::Accepted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItemResult>,
    pub summary: BatchSummary,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
