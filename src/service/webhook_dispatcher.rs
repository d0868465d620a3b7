use crate::config::DeliveryPolicy;
use crate::domain::audit::AuditAction;
use crate::domain::event::StatusChanged;
use crate::repo::audit_repo::AuditRepo;
use crate::repo::webhook_repo::WebhookRepo;
use crate::service::retry_orchestrator::{attempt_limit, classify_attempt, RetryDirective};
use crate::webhooks::{AttemptResult, WebhookTransport};
use std::sync::Arc;

/// Terminal result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    NotSubscribed,
    Delivered { attempts: u32 },
    Exhausted { attempts: u32, last_error: String },
}

#[derive(Clone)]
pub struct WebhookDispatcher {
    pub webhook_repo: WebhookRepo,
    pub audit: AuditRepo,
    pub transport: Arc<dyn WebhookTransport>,
    pub policy: DeliveryPolicy,
}

impl WebhookDispatcher {
    pub async fn dispatch(&self, event: &StatusChanged) -> DeliveryOutcome {
        let Some(hook) = self.webhook_repo.find_for_payment(&event.payment_id).await else {
            tracing::debug!("no webhook registered for payment {}", event.payment_id);
            return DeliveryOutcome::NotSubscribed;
        };

        let limit = attempt_limit(&self.policy);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match tokio::time::timeout(
                self.policy.attempt_timeout,
                self.transport
                    .deliver(&hook.target_url, event, self.policy.attempt_timeout),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => AttemptResult::TimedOut,
            };

            match classify_attempt(&result, attempt, &self.policy) {
                RetryDirective::Delivered => {
                    self.audit.record(
                        None,
                        AuditAction::WebhookDelivered,
                        serde_json::json!({
                            "payment_id": event.payment_id,
                            "url": hook.target_url,
                            "status": event.status,
                            "attempts": attempt,
                        }),
                    );
                    return DeliveryOutcome::Delivered { attempts: attempt };
                }
                RetryDirective::RetryAfter(delay) => {
                    tracing::warn!(
                        "webhook attempt {}/{} for payment {} failed: {}, retrying in {:?}",
                        attempt,
                        limit,
                        event.payment_id,
                        result.describe(),
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDirective::Exhausted => {
                    let last_error = result.describe();
                    tracing::error!(
                        "webhook delivery for payment {} to {} exhausted after {} attempts: {}",
                        event.payment_id,
                        hook.target_url,
                        attempt,
                        last_error
                    );
                    self.audit.record(
                        None,
                        AuditAction::WebhookFailed,
                        serde_json::json!({
                            "payment_id": event.payment_id,
                            "url": hook.target_url,
                            "status": event.status,
                            "attempts": attempt,
                            "last_error": last_error,
                        }),
                    );
                    return DeliveryOutcome::Exhausted {
                        attempts: attempt,
                        last_error,
                    };
                }
            }
        }
    }
}
