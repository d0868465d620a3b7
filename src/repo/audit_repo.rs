use crate::domain::audit::{AuditAction, AuditEntry};
use std::sync::{Arc, Mutex, PoisonError};

/// Append-only audit trail. Recording never fails the caller.
#[derive(Clone, Default)]
pub struct AuditRepo {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, principal: Option<&str>, action: AuditAction, detail: serde_json::Value) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = AuditEntry {
            sequence: entries.len() as u64 + 1,
            timestamp: chrono::Utc::now(),
            principal: principal.map(str::to_string),
            action,
            detail,
        };
        tracing::debug!(
            "audit #{} {} principal={}",
            entry.sequence,
            action.as_str(),
            principal.unwrap_or("system")
        );
        entries.push(entry);
    }

    /// Full sequence in insertion order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count_action(&self, action: AuditAction) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}
