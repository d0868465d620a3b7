use crate::domain::event::StatusChanged;
use crate::webhooks::{AttemptResult, WebhookTransport};
use std::time::Duration;

/// POSTs the event as JSON; any 2xx counts as acknowledged.
#[derive(Clone, Default)]
pub struct HttpWebhookTransport {
    pub client: reqwest::Client,
}

impl HttpWebhookTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn deliver(&self, target_url: &str, event: &StatusChanged, timeout: Duration) -> AttemptResult {
        let resp = self
            .client
            .post(target_url)
            .header("Content-Type", "application/json")
            .header("X-Event-Type", "payment.status_changed")
            .json(event)
            .timeout(timeout)
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => AttemptResult::Acknowledged {
                status_code: r.status().as_u16(),
            },
            Ok(r) => AttemptResult::Rejected {
                status_code: r.status().as_u16(),
            },
            Err(e) if e.is_timeout() => AttemptResult::TimedOut,
            Err(e) => AttemptResult::TransportError(e.to_string()),
        }
    }
}
