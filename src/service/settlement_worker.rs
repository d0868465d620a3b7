use crate::core_banking::CoreBankingBackend;
use crate::domain::audit::AuditAction;
use crate::domain::event::StatusChanged;
use crate::domain::payment::PaymentStatus;
use crate::repo::audit_repo::AuditRepo;
use crate::repo::payments_repo::PaymentsRepo;
use crate::service::webhook_dispatcher::{DeliveryOutcome, WebhookDispatcher};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum SettlementOutcome {
    Settled(StatusChanged, DeliveryOutcome),
    AlreadySettled,
    BackendFailed(String),
    UnknownPayment,
}

/// Runs settlement off the request path. Callers never join the spawned
/// task; completion shows up in the ledger and the audit trail.
#[derive(Clone)]
pub struct SettlementWorker {
    pub payments_repo: PaymentsRepo,
    pub backend: Arc<dyn CoreBankingBackend>,
    pub dispatcher: WebhookDispatcher,
    pub audit: AuditRepo,
}

impl SettlementWorker {
    pub fn settle(&self, payment_id: &str) -> JoinHandle<SettlementOutcome> {
        let worker = self.clone();
        let payment_id = payment_id.to_string();
        tokio::spawn(async move { worker.run(&payment_id).await })
    }

    pub async fn run(&self, payment_id: &str) -> SettlementOutcome {
        let Some(started) = self.payments_repo.begin_settlement(payment_id).await else {
            tracing::warn!("settlement requested for unknown payment {}, discarding", payment_id);
            return SettlementOutcome::UnknownPayment;
        };
        if started.payment.status == PaymentStatus::Settled {
            return SettlementOutcome::AlreadySettled;
        }
        if started.changed {
            self.audit.record(
                None,
                AuditAction::SettlementStarted,
                serde_json::json!({ "payment_id": payment_id }),
            );
        }

        let receipt = match self.backend.settle(&started.payment).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::error!("core banking settlement failed for {}: {}", payment_id, e);
                self.audit.record(
                    None,
                    AuditAction::SettlementFailed,
                    serde_json::json!({
                        "payment_id": payment_id,
                        "backend": self.backend.name(),
                        "error": e.to_string(),
                    }),
                );
                return SettlementOutcome::BackendFailed(e.to_string());
            }
        };

        let Some(completed) = self.payments_repo.complete_settlement(payment_id).await else {
            return SettlementOutcome::UnknownPayment;
        };
        if !completed.changed {
            // another task already completed this payment and published its event
            return SettlementOutcome::AlreadySettled;
        }

        self.audit.record(
            None,
            AuditAction::PaymentSettled,
            serde_json::json!({
                "payment_id": payment_id,
                "settlement_time": completed.payment.settlement_time,
                "receipt": receipt,
            }),
        );
        tracing::info!("payment {} settled via {}", payment_id, receipt.backend);

        let event = StatusChanged::from(&completed.payment);
        let delivery = self.dispatcher.dispatch(&event).await;
        SettlementOutcome::Settled(event, delivery)
    }
}
