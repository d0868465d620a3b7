use crate::core_banking::{CoreBankingBackend, SettlementReceipt};
use crate::domain::payment::Payment;
use anyhow::Result;

/// Deterministic stand-in for the legacy core-banking system.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCoreBanking;

#[async_trait::async_trait]
impl CoreBankingBackend for SimulatedCoreBanking {
    fn name(&self) -> &'static str {
        "simulated_cbs"
    }

    async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt> {
        Ok(SettlementReceipt {
            backend: self.name().to_string(),
            reference: format!("cbs_{}", payment.payment_id),
        })
    }
}
