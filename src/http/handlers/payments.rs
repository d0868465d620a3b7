use crate::domain::payment::PaymentRequest;
use crate::error::PaymentError;
use crate::http::middleware::principal::Principal;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

pub async fn create_payment(
    State(state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Json(req): Json<PaymentRequest>,
) -> impl IntoResponse {
    match state.payment_service.submit_payment(&principal, req).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn create_batch(
    State(state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Json(requests): Json<Vec<PaymentRequest>>,
) -> impl IntoResponse {
    let resp = state.payment_service.submit_batch(&principal, requests).await;
    (StatusCode::OK, Json(resp)).into_response()
}

pub async fn get_status(
    State(state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.get_status(&principal, &payment_id).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn settle(
    State(state): State<AppState>,
    Extension(Principal(principal)): Extension<Principal>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.request_settlement(&principal, &payment_id).await {
        Ok(out) if out.triggered => (StatusCode::ACCEPTED, Json(out.view)).into_response(),
        Ok(out) => (StatusCode::OK, Json(out.view)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub fn error_response(e: &PaymentError) -> Response {
    (e.status_code(), Json(e.to_envelope())).into_response()
}
