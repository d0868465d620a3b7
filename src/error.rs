use crate::domain::payment::{ErrorEnvelope, ErrorPayload};
use crate::guardrails::fraud::FraudFlag;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("rate limit exceeded, retry later")]
    RateLimited,
    #[error("payment blocked by fraud screening: {}", join_flags(.flags))]
    FraudSuspected { flags: Vec<FraudFlag> },
    #[error("unsupported currency pair {from}->{to}")]
    UnsupportedCurrencyPair { from: String, to: String },
    #[error("payment {0} not found")]
    NotFound(String),
}

impl PaymentError {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::Validation(_) => "VALIDATION_ERROR",
            PaymentError::RateLimited => "RATE_LIMITED",
            PaymentError::FraudSuspected { .. } => "FRAUD_SUSPECTED",
            PaymentError::UnsupportedCurrencyPair { .. } => "UNSUPPORTED_CURRENCY_PAIR",
            PaymentError::NotFound(_) => "NOT_FOUND",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PaymentError::FraudSuspected { .. } => StatusCode::FORBIDDEN,
            PaymentError::UnsupportedCurrencyPair { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        let details = match self {
            PaymentError::FraudSuspected { flags } => Some(serde_json::json!({ "flags": flags })),
            PaymentError::UnsupportedCurrencyPair { from, to } => {
                Some(serde_json::json!({ "from": from, "to": to }))
            }
            _ => None,
        };
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.to_payload(),
        }
    }
}

fn join_flags(flags: &[FraudFlag]) -> String {
    flags
        .iter()
        .map(FraudFlag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
