use crate::domain::payment::{Payment, PaymentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published by the settlement worker; serialized as-is for webhook bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChanged {
    pub payment_id: String,
    pub status: PaymentStatus,
    pub settlement_time: Option<DateTime<Utc>>,
}

impl From<&Payment> for StatusChanged {
    fn from(p: &Payment) -> Self {
        Self {
            payment_id: p.payment_id.clone(),
            status: p.status,
            settlement_time: p.settlement_time,
        }
    }
}
