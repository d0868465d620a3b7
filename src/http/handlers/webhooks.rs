use crate::domain::payment::RegisterWebhookRequest;
use crate::http::handlers::payments::error_response;
use crate::http::middleware::principal::Principal;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

pub async fn register_webhook(
    State(state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Path(payment_id): Path<String>,
    Json(req): Json<RegisterWebhookRequest>,
) -> impl IntoResponse {
    match state
        .payment_service
        .register_webhook(&principal, &payment_id, &req.url)
        .await
    {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => error_response(&e),
    }
}
