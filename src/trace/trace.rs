use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::selection::selection_model::SelectionUpdate;

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub event: String,

    pub element_id: Option<String>,
    pub group: Option<String>,

    pub replacement: Option<String>,
    pub restored: Option<bool>,

    pub pool_len: Option<usize>,
    pub output: Option<Vec<String>>,

    pub catalog_fingerprint: Option<String>,
    pub rejection_reason: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, event: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            event: event.to_string(),
            element_id: None,
            group: None,
            replacement: None,
            restored: None,
            pool_len: None,
            output: None,
            catalog_fingerprint: None,
            rejection_reason: None,
        }
    }

    pub fn with_element(mut self, id: &str, group: Option<&str>) -> Self {
        self.element_id = Some(id.to_string());
        self.group = group.map(|g| g.to_string());
        self
    }

    /// Copy the interesting parts of an engine update.
    pub fn with_update(mut self, update: &SelectionUpdate) -> Self {
        self.element_id = Some(update.element.id.clone());
        self.group = Some(update.element.group.clone());
        self.replacement = update.replacement.as_ref().map(|e| e.id.clone());
        self.pool_len = Some(update.pool.len());
        self.output = Some(update.output.clone());
        self
    }

    pub fn with_restored(mut self, restored: bool) -> Self {
        self.restored = Some(restored);
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl ToString) -> Self {
        self.catalog_fingerprint = Some(fingerprint.to_string());
        self
    }

    pub fn with_rejection(mut self, reason: impl ToString) -> Self {
        self.rejection_reason = Some(reason.to_string());
        self
    }
}
