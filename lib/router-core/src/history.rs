//! Host navigation history

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// One recorded location in the history stack
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    /// Full href including the base path
    pub href: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            href: href.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// The host environment's location/history mechanism.
///
/// The router only pushes and replaces entries; moving through the stack is
/// initiated by the host (back/forward buttons) or by `go`.
pub trait History: Send {
    /// Href of the current entry
    fn location(&self) -> &str;

    /// Record a new entry after the current one, discarding forward entries
    fn push(&mut self, href: &str);

    /// Overwrite the current entry
    fn replace(&mut self, href: &str);

    /// Move `delta` entries through the stack. Returns the new href, or
    /// `None` (without moving) if the target is out of range.
    fn go(&mut self, delta: isize) -> Option<String>;

    /// Number of entries in the stack
    fn len(&self) -> usize;

    /// Index of the current entry
    fn position(&self) -> usize;

    /// All recorded entries, oldest first
    fn entries(&self) -> &[HistoryEntry];
}

/// In-memory history stack, used by headless hosts and tests
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    position: usize,
}

impl MemoryHistory {
    /// Create a history whose only entry is the initial href
    pub fn new(initial_href: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial_href)],
            position: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.position]
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        &self.current().href
    }

    fn push(&mut self, href: &str) {
        self.entries.truncate(self.position + 1);
        self.entries.push(HistoryEntry::new(href));
        self.position = self.entries.len() - 1;
        debug!("History push: {} (position {})", href, self.position);
    }

    fn replace(&mut self, href: &str) {
        self.entries[self.position] = HistoryEntry::new(href);
        debug!("History replace: {} (position {})", href, self.position);
    }

    fn go(&mut self, delta: isize) -> Option<String> {
        if delta == 0 {
            return None;
        }
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        debug!("History go({}): {} (position {})", delta, self.location(), self.position);
        Some(self.location().to_string())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn position(&self) -> usize {
        self.position
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
