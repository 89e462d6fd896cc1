// Search input with debounce.
// Keystrokes edit a draft; the draft is committed once typing pauses.

use std::time::{Duration, Instant};

/// Pause after the last keystroke before the search is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Text as typed, including uncommitted changes.
    pub draft: String,
    /// Whether keystrokes currently go to the search bar.
    pub editing: bool,
    debounce: Duration,
    due: Option<Instant>,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchInput {
    pub fn new(debounce: Duration) -> Self {
        Self {
            draft: String::new(),
            editing: false,
            debounce,
            due: None,
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn push(&mut self, c: char, now: Instant) {
        self.draft.push(c);
        self.due = Some(now + self.debounce);
    }

    pub fn pop(&mut self, now: Instant) {
        if self.draft.pop().is_some() {
            self.due = Some(now + self.debounce);
        }
    }

    /// The draft, once the debounce has elapsed since the last edit.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                Some(self.draft.clone())
            }
            _ => None,
        }
    }

    /// The draft right away if an edit is pending.
    pub fn flush(&mut self) -> Option<String> {
        self.due.take().map(|_| self.draft.clone())
    }

    /// Drop a pending edit without applying it.
    pub fn cancel(&mut self) {
        self.due = None;
    }
}
