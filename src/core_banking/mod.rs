use crate::domain::payment::Payment;
use anyhow::Result;
use serde::Serialize;

pub mod simulated;

#[derive(Debug, Clone, Serialize)]
pub struct SettlementReceipt {
    pub backend: String,
    pub reference: String,
}

/// Seam towards the core-banking system that books the payment.
#[async_trait::async_trait]
pub trait CoreBankingBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt>;
}
