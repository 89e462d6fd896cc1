// Loading state for async data and the active flag that guards it.
// Views render from these; fetch tasks report back through them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Loading state for async data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> Default for LoadingState<T> {
    fn default() -> Self {
        LoadingState::Idle
    }
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadingState::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Shared "still interested" flag for one fetch.
///
/// Deactivating it makes the owner ignore the fetch's result. The network call
/// itself keeps running.
#[derive(Debug, Clone)]
pub struct ActiveFlag(Arc<AtomicBool>);

impl ActiveFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn deactivate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Whether both handles refer to the same fetch.
    pub fn same_as(&self, other: &ActiveFlag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for ActiveFlag {
    fn default() -> Self {
        Self::new()
    }
}
