use crate::config::GuardrailLimits;
use crate::domain::audit::AuditAction;
use crate::domain::payment::{Enrichment, PaymentRequest};
use crate::error::PaymentError;
use crate::fx::rates::FxRateTable;
use crate::guardrails::fraud::FraudScreen;
use crate::guardrails::rate_limit::RateLimiter;
use crate::metrics::counters::Metrics;
use crate::repo::audit_repo::AuditRepo;
use std::sync::Arc;

/// Ordered admission checks: rate limit, fraud screen, currency conversion.
/// The first rejecting step short-circuits the rest.
#[derive(Clone)]
pub struct GuardrailPipeline {
    pub rate_limiter: Arc<RateLimiter>,
    pub fraud_screen: Arc<FraudScreen>,
    pub fx_rates: Arc<FxRateTable>,
    pub metrics: Arc<Metrics>,
    pub audit: AuditRepo,
}

impl GuardrailPipeline {
    pub fn new(limits: &GuardrailLimits, fx_rates: FxRateTable, metrics: Arc<Metrics>, audit: AuditRepo) -> Self {
        Self {
            rate_limiter: Arc::new(RateLimiter::new(
                limits.rate_limit_window,
                limits.rate_limit_max_requests,
            )),
            fraud_screen: Arc::new(FraudScreen::new(
                limits.fraud_amount_ceiling,
                limits.denylisted_accounts.iter().cloned(),
            )),
            fx_rates: Arc::new(fx_rates),
            metrics,
            audit,
        }
    }

    pub fn admit(&self, principal: &str, req: &PaymentRequest) -> Result<Enrichment, PaymentError> {
        self.metrics.record_request();
        let outcome = self.evaluate(principal, req);

        match &outcome {
            Ok(enrichment) => {
                self.metrics.record_success();
                self.audit.record(
                    Some(principal),
                    AuditAction::PaymentAdmitted,
                    serde_json::json!({ "request": req, "enrichment": enrichment }),
                );
            }
            Err(e) => {
                match e {
                    PaymentError::RateLimited => self.metrics.record_rate_limit_hit(),
                    PaymentError::FraudSuspected { .. } => self.metrics.record_fraud_block(),
                    _ => {}
                }
                tracing::info!("payment from {} rejected: {}", principal, e);
                self.audit.record(
                    Some(principal),
                    AuditAction::PaymentRejected,
                    serde_json::json!({ "request": req, "reason": e.to_payload() }),
                );
            }
        }

        outcome
    }

    fn evaluate(&self, principal: &str, req: &PaymentRequest) -> Result<Enrichment, PaymentError> {
        if !self.rate_limiter.check(principal) {
            return Err(PaymentError::RateLimited);
        }

        let flags = self.fraud_screen.screen(req);
        if !flags.is_empty() {
            return Err(PaymentError::FraudSuspected { flags });
        }

        match req.target_currency.as_deref() {
            Some(target) if target != req.currency => {
                let (rate, converted) = self.fx_rates.convert(req.amount, &req.currency, target)?;
                Ok(Enrichment {
                    fx_rate: Some(rate),
                    converted_amount: converted,
                    target_currency: target.to_string(),
                })
            }
            _ => Ok(Enrichment {
                fx_rate: None,
                converted_amount: req.amount,
                target_currency: req.currency.clone(),
            }),
        }
    }
}
