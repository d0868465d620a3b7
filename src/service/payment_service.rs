use crate::domain::audit::AuditAction;
use crate::domain::payment::{
    BatchItemResult, BatchResponse, BatchSummary, PaymentRequest, PaymentStatus, PaymentStatusView, WebhookAck,
};
use crate::error::PaymentError;
use crate::guardrails::pipeline::GuardrailPipeline;
use crate::repo::audit_repo::AuditRepo;
use crate::repo::payments_repo::PaymentsRepo;
use crate::repo::webhook_repo::WebhookRepo;
use crate::service::settlement_worker::SettlementWorker;

/// Outcome of a settlement trigger: `triggered` is true only for the call
/// that moved the payment out of pending.
#[derive(Debug, Clone)]
pub struct SettlementRequested {
    pub view: PaymentStatusView,
    pub triggered: bool,
}

#[derive(Clone)]
pub struct PaymentService {
    pub guardrails: GuardrailPipeline,
    pub payments_repo: PaymentsRepo,
    pub webhook_repo: WebhookRepo,
    pub settlement_worker: SettlementWorker,
    pub audit: AuditRepo,
}

impl PaymentService {
    pub async fn submit_payment(
        &self,
        principal: &str,
        req: PaymentRequest,
    ) -> Result<PaymentStatusView, PaymentError> {
        if let Err(e) = validate_request(&req) {
            self.audit.record(
                Some(principal),
                AuditAction::PaymentInvalid,
                serde_json::json!({ "request": req, "reason": e.to_payload() }),
            );
            return Err(e);
        }

        let enrichment = self.guardrails.admit(principal, &req)?;
        let payment = self.payments_repo.create(&req, enrichment).await;
        tracing::info!(
            "payment {} created for {} ({} {})",
            payment.payment_id,
            principal,
            payment.amount,
            payment.currency
        );
        Ok(PaymentStatusView::from(&payment))
    }

    pub async fn get_status(&self, _principal: &str, payment_id: &str) -> Result<PaymentStatusView, PaymentError> {
        self.payments_repo
            .get(payment_id)
            .await
            .map(|p| PaymentStatusView::from(&p))
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }

    /// Moves a pending payment to settling and hands it to the worker.
    /// Repeated or concurrent triggers return the current record.
    pub async fn request_settlement(
        &self,
        principal: &str,
        payment_id: &str,
    ) -> Result<SettlementRequested, PaymentError> {
        let transition = self
            .payments_repo
            .begin_settlement(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;

        self.audit.record(
            Some(principal),
            AuditAction::SettlementRequested,
            serde_json::json!({
                "payment_id": payment_id,
                "status": transition.payment.status,
                "triggered": transition.changed,
            }),
        );

        if transition.changed {
            self.audit.record(
                None,
                AuditAction::SettlementStarted,
                serde_json::json!({ "payment_id": payment_id }),
            );
            drop(self.settlement_worker.settle(payment_id));
        }

        Ok(SettlementRequested {
            view: PaymentStatusView::from(&transition.payment),
            triggered: transition.changed,
        })
    }

    pub async fn register_webhook(
        &self,
        principal: &str,
        payment_id: &str,
        url: &str,
    ) -> Result<WebhookAck, PaymentError> {
        validate_webhook_url(url)?;
        let payment = self
            .payments_repo
            .get(payment_id)
            .await
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))?;

        let replaced = self.webhook_repo.register(payment_id, url).await;
        self.audit.record(
            Some(principal),
            AuditAction::WebhookRegistered,
            serde_json::json!({ "payment_id": payment_id, "url": url, "replaced": replaced }),
        );

        if payment.status == PaymentStatus::Settled {
            tracing::debug!("webhook registered for already settled payment {}", payment_id);
        }

        Ok(WebhookAck {
            payment_id: payment_id.to_string(),
            url: url.to_string(),
            acknowledged: true,
        })
    }

    /// Items are admitted independently; one rejection never fails the batch.
    pub async fn submit_batch(&self, principal: &str, requests: Vec<PaymentRequest>) -> BatchResponse {
        let mut results = Vec::with_capacity(requests.len());
        for (index, req) in requests.into_iter().enumerate() {
            let item = match self.submit_payment(principal, req).await {
                Ok(payment) => BatchItemResult::Accepted { index, payment },
                Err(e) => BatchItemResult::Rejected {
                    index,
                    error: e.to_payload(),
                },
            };
            results.push(item);
        }

        let success = results.iter().filter(|r| r.is_accepted()).count();
        let summary = BatchSummary {
            success,
            failed: results.len() - success,
            total: results.len(),
        };
        BatchResponse { results, summary }
    }
}

fn validate_request(req: &PaymentRequest) -> Result<(), PaymentError> {
    if req.amount <= rust_decimal::Decimal::ZERO {
        return Err(PaymentError::Validation("amount must be > 0".to_string()));
    }
    if req.from_account.trim().is_empty() || req.to_account.trim().is_empty() {
        return Err(PaymentError::Validation("accounts must not be empty".to_string()));
    }
    if !is_currency_code(&req.currency) {
        return Err(PaymentError::Validation(format!("invalid currency code {}", req.currency)));
    }
    if let Some(target) = &req.target_currency {
        if !is_currency_code(target) {
            return Err(PaymentError::Validation(format!("invalid currency code {}", target)));
        }
    }
    Ok(())
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

fn validate_webhook_url(url: &str) -> Result<(), PaymentError> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| PaymentError::Validation(format!("invalid webhook url: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PaymentError::Validation(format!(
            "unsupported webhook url scheme {}",
            other
        ))),
    }
}
