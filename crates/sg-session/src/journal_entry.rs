use crate::JournalEventKind;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub at: DateTime<Utc>,
    pub kind: JournalEventKind,
    pub detail: String,
}

impl JournalEntry {
    pub fn new(kind: JournalEventKind, detail: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            kind,
            detail: detail.into(),
        }
    }
}
