use crate::{JournalEntry, JournalEventKind};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Append-only diagnostic trail of reconciliation events.
///
/// Bounded ring buffer: old entries fall off the front once capacity is
/// reached. Purely observational - nothing in the engine reads it back.
#[derive(Clone)]
pub struct Journal {
    inner: Arc<Mutex<VecDeque<JournalEntry>>>,
    capacity: usize,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn record(&self, kind: JournalEventKind, detail: impl Into<String>) {
        let entry = JournalEntry::new(kind, detail);
        log::debug!("journal: {} {}", entry.kind, entry.detail);

        let mut entries = self.inner.lock().unwrap();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Copy of the current trail, oldest first.
    pub fn snapshot(&self) -> Vec<JournalEntry> {
        self.inner.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
