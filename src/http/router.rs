use crate::http::handlers::{ops, payments, webhooks};
use crate::http::middleware::principal::require_principal;
use crate::AppState;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/payments", post(payments::create_payment))
        .route("/api/payments/batch", post(payments::create_batch))
        .route("/api/payments/:payment_id/status", get(payments::get_status))
        .route("/api/payments/:payment_id/settle", post(payments::settle))
        .route("/api/payments/:payment_id/webhook", post(webhooks::register_webhook))
        .layer(from_fn(require_principal));

    Router::new()
        .route("/health", get(payments::health))
        .route("/ops/liveness", get(ops::liveness))
        .route("/metrics", get(ops::metrics))
        .route("/audit", get(ops::audit_log))
        .merge(api)
        .with_state(state)
}
