use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSubscription {
    pub payment_id: String,
    pub target_url: String,
}

/// One subscriber per payment; re-registration overwrites.
#[derive(Clone, Default)]
pub struct WebhookRepo {
    subscriptions: Arc<RwLock<HashMap<String, String>>>,
}

impl WebhookRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL that was replaced, if any.
    pub async fn register(&self, payment_id: &str, target_url: &str) -> Option<String> {
        self.subscriptions
            .write()
            .await
            .insert(payment_id.to_string(), target_url.to_string())
    }

    pub async fn find_for_payment(&self, payment_id: &str) -> Option<WebhookSubscription> {
        self.subscriptions
            .read()
            .await
            .get(payment_id)
            .map(|url| WebhookSubscription {
                payment_id: payment_id.to_string(),
                target_url: url.clone(),
            })
    }
}
