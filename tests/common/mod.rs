#![allow(dead_code)]

use rust_decimal::Decimal;
use settlement_gateway::config::{AppConfig, DeliveryPolicy, GuardrailLimits};
use settlement_gateway::core_banking::simulated::SimulatedCoreBanking;
use settlement_gateway::domain::event::StatusChanged;
use settlement_gateway::domain::payment::{PaymentRequest, PaymentStatus, PaymentStatusView};
use settlement_gateway::webhooks::{AttemptResult, WebhookTransport};
use settlement_gateway::AppState;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn fast_delivery() -> DeliveryPolicy {
    DeliveryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
        attempt_timeout: Duration::from_millis(200),
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        guardrails: GuardrailLimits::default(),
        delivery: fast_delivery(),
    }
}

pub fn state_with(transport: Arc<dyn WebhookTransport>) -> AppState {
    AppState::new(&test_config(), transport, Arc::new(SimulatedCoreBanking))
}

pub fn request(amount: Decimal, currency: &str, target: Option<&str>) -> PaymentRequest {
    PaymentRequest {
        from_account: "ACC-1001".to_string(),
        to_account: "ACC-2002".to_string(),
        amount,
        currency: currency.to_string(),
        target_currency: target.map(str::to_string),
    }
}

/// Plays back scripted attempt results, then `fallback` forever.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<AttemptResult>>,
    fallback: AttemptResult,
    pub attempts: AtomicU32,
    pub delivered: Mutex<Vec<(String, StatusChanged)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<AttemptResult>, fallback: AttemptResult) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            attempts: AtomicU32::new(0),
            delivered: Mutex::new(Vec::new()),
        })
    }

    pub fn always_ok() -> Arc<Self> {
        Self::new(vec![], AttemptResult::Acknowledged { status_code: 200 })
    }

    pub fn always_failing() -> Arc<Self> {
        Self::new(vec![], AttemptResult::Rejected { status_code: 500 })
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn acknowledged(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl WebhookTransport for ScriptedTransport {
    async fn deliver(&self, target_url: &str, event: &StatusChanged, _timeout: Duration) -> AttemptResult {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let result = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        if result.is_acknowledged() {
            self.delivered
                .lock()
                .unwrap()
                .push((target_url.to_string(), event.clone()));
        }
        result
    }
}

pub async fn wait_for_status(state: &AppState, payment_id: &str, status: PaymentStatus) -> PaymentStatusView {
    for _ in 0..200 {
        let view = state
            .payment_service
            .get_status("tester", payment_id)
            .await
            .unwrap();
        if view.status == status {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("payment {} never reached {:?}", payment_id, status);
}
