use crate::domain::payment::{Enrichment, Payment, PaymentRequest, PaymentStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// In-memory payment ledger.
///
/// The map lock is only held to insert or look up a record; state transitions
/// take the per-payment mutex, so settlements of different payments do not
/// serialize against each other.
#[derive(Clone, Default)]
pub struct PaymentsRepo {
    records: Arc<RwLock<HashMap<String, Arc<Mutex<Payment>>>>>,
}

/// A ledger record after a transition call. `changed` is false when the call
/// was an idempotent no-op.
#[derive(Debug, Clone)]
pub struct Transition {
    pub payment: Payment,
    pub changed: bool,
}

impl PaymentsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, req: &PaymentRequest, enrichment: Enrichment) -> Payment {
        let payment_id = Uuid::new_v4().to_string();
        let payment = Payment::new(payment_id.clone(), req, enrichment);
        self.records
            .write()
            .await
            .insert(payment_id, Arc::new(Mutex::new(payment.clone())));
        payment
    }

    pub async fn get(&self, payment_id: &str) -> Option<Payment> {
        let record = self.record(payment_id).await?;
        let payment = record.lock().await.clone();
        Some(payment)
    }

    /// pending -> settling. Already settling or settled records are returned unchanged.
    pub async fn begin_settlement(&self, payment_id: &str) -> Option<Transition> {
        let record = self.record(payment_id).await?;
        let mut payment = record.lock().await;
        let changed = payment.status == PaymentStatus::Pending;
        if changed {
            payment.status = PaymentStatus::Settling;
        }
        Some(Transition {
            payment: payment.clone(),
            changed,
        })
    }

    /// settling -> settled, stamping the settlement time. A settled record is
    /// returned unchanged; a pending one is left pending until settlement begins.
    pub async fn complete_settlement(&self, payment_id: &str) -> Option<Transition> {
        let record = self.record(payment_id).await?;
        let mut payment = record.lock().await;
        let changed = payment.status == PaymentStatus::Settling;
        if changed {
            payment.status = PaymentStatus::Settled;
            payment.settlement_time = Some(chrono::Utc::now());
        }
        Some(Transition {
            payment: payment.clone(),
            changed,
        })
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn record(&self, payment_id: &str) -> Option<Arc<Mutex<Payment>>> {
        self.records.read().await.get(payment_id).cloned()
    }
}
