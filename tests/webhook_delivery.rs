mod common;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{fast_delivery, ScriptedTransport};
use settlement_gateway::domain::audit::AuditAction;
use settlement_gateway::domain::event::StatusChanged;
use settlement_gateway::domain::payment::PaymentStatus;
use settlement_gateway::repo::audit_repo::AuditRepo;
use settlement_gateway::repo::webhook_repo::WebhookRepo;
use settlement_gateway::service::webhook_dispatcher::{DeliveryOutcome, WebhookDispatcher};
use settlement_gateway::webhooks::http::HttpWebhookTransport;
use settlement_gateway::webhooks::{AttemptResult, WebhookTransport};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn event(payment_id: &str) -> StatusChanged {
    StatusChanged {
        payment_id: payment_id.to_string(),
        status: PaymentStatus::Settled,
        settlement_time: Some(chrono::Utc::now()),
    }
}

async fn dispatcher(transport: Arc<dyn WebhookTransport>) -> (WebhookDispatcher, AuditRepo) {
    let webhook_repo = WebhookRepo::new();
    webhook_repo.register("p1", "http://subscriber.test/hook").await;
    let audit = AuditRepo::new();
    let d = WebhookDispatcher {
        webhook_repo,
        audit: audit.clone(),
        transport,
        policy: fast_delivery(),
    };
    (d, audit)
}

#[tokio::test]
async fn fails_twice_then_succeeds() {
    let transport = ScriptedTransport::new(
        vec![
            AttemptResult::Rejected { status_code: 503 },
            AttemptResult::TransportError("connection reset".to_string()),
        ],
        AttemptResult::Acknowledged { status_code: 200 },
    );
    let (d, audit) = dispatcher(transport.clone()).await;

    let outcome = d.dispatch(&event("p1")).await;
    assert_eq!(outcome, DeliveryOutcome::Delivered { attempts: 3 });
    assert_eq!(transport.attempts(), 3);
    assert_eq!(transport.acknowledged(), 1);
    assert_eq!(audit.count_action(AuditAction::WebhookFailed), 0);
    assert_eq!(audit.count_action(AuditAction::WebhookDelivered), 1);
}

#[tokio::test]
async fn always_failing_endpoint_exhausts_after_three_attempts() {
    let transport = ScriptedTransport::always_failing();
    let (d, audit) = dispatcher(transport.clone()).await;

    let outcome = d.dispatch(&event("p1")).await;
    assert_eq!(
        outcome,
        DeliveryOutcome::Exhausted {
            attempts: 3,
            last_error: "HTTP_500".to_string()
        }
    );
    assert_eq!(transport.attempts(), 3);

    let failed: Vec<_> = audit
        .entries()
        .into_iter()
        .filter(|e| e.action == AuditAction::WebhookFailed)
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].principal.is_none());
    assert_eq!(failed[0].detail["payment_id"], "p1");
    assert_eq!(failed[0].detail["url"], "http://subscriber.test/hook");
    assert_eq!(failed[0].detail["status"], "settled");
}

#[tokio::test]
async fn unsubscribed_event_is_dropped() {
    let transport = ScriptedTransport::always_ok();
    let (d, audit) = dispatcher(transport.clone()).await;

    let outcome = d.dispatch(&event("nobody-listens")).await;
    assert_eq!(outcome, DeliveryOutcome::NotSubscribed);
    assert_eq!(transport.attempts(), 0);
    assert!(audit.entries().is_empty());
}

struct HangingTransport {
    calls: AtomicU32,
}

#[async_trait::async_trait]
impl WebhookTransport for HangingTransport {
    async fn deliver(&self, _url: &str, _event: &StatusChanged, _timeout: Duration) -> AttemptResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        AttemptResult::Acknowledged { status_code: 200 }
    }
}

#[tokio::test]
async fn slow_attempts_are_cut_by_timeout() {
    let transport = Arc::new(HangingTransport {
        calls: AtomicU32::new(0),
    });
    let (mut d, audit) = dispatcher(transport.clone()).await;
    d.policy.attempt_timeout = Duration::from_millis(20);

    let outcome = d.dispatch(&event("p1")).await;
    assert_eq!(
        outcome,
        DeliveryOutcome::Exhausted {
            attempts: 3,
            last_error: "TIMEOUT".to_string()
        }
    );
    assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    assert_eq!(audit.count_action(AuditAction::WebhookFailed), 1);
}

#[derive(Clone, Default)]
struct Subscriber {
    hits: Arc<AtomicU32>,
    fail_first: u32,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn receive(State(sub): State<Subscriber>, Json(body): Json<serde_json::Value>) -> StatusCode {
    let n = sub.hits.fetch_add(1, Ordering::SeqCst) + 1;
    if n <= sub.fail_first {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    sub.bodies.lock().unwrap().push(body);
    StatusCode::NO_CONTENT
}

async fn spawn_subscriber(sub: Subscriber) -> String {
    let app = Router::new().route("/hook", post(receive)).with_state(sub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/hook", addr)
}

#[tokio::test]
async fn http_subscriber_receives_json_body_after_retries() {
    let sub = Subscriber {
        fail_first: 2,
        ..Default::default()
    };
    let url = spawn_subscriber(sub.clone()).await;

    let webhook_repo = WebhookRepo::new();
    webhook_repo.register("p-http", &url).await;
    let audit = AuditRepo::new();
    let d = WebhookDispatcher {
        webhook_repo,
        audit: audit.clone(),
        transport: Arc::new(HttpWebhookTransport::new(reqwest::Client::new())),
        policy: fast_delivery(),
    };

    let outcome = d.dispatch(&event("p-http")).await;
    assert_eq!(outcome, DeliveryOutcome::Delivered { attempts: 3 });
    assert_eq!(sub.hits.load(Ordering::SeqCst), 3);

    let bodies = sub.bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["payment_id"], "p-http");
    assert_eq!(bodies[0]["status"], "settled");
    assert!(bodies[0]["settlement_time"].is_string());
    assert_eq!(audit.count_action(AuditAction::WebhookFailed), 0);
}

#[tokio::test]
async fn unreachable_subscriber_is_a_retryable_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpWebhookTransport::new(reqwest::Client::new());
    let result = transport
        .deliver(&format!("http://{}/hook", addr), &event("p1"), Duration::from_millis(500))
        .await;
    assert!(matches!(
        result,
        AttemptResult::TransportError(_) | AttemptResult::TimedOut
    ));
}
