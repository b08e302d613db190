use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Bodies behind live resource handles, keyed by handle id.
///
/// Cloning shares the store. Every insert must be paired with a release;
/// [`ResourceStore::live_count`] exposes leaks.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    bodies: Arc<Mutex<HashMap<u64, Arc<str>>>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, Arc<str>>> {
        self.bodies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, id: u64, body: impl Into<Arc<str>>) {
        self.lock().insert(id, body.into());
    }

    pub fn get(&self, id: u64) -> Option<Arc<str>> {
        self.lock().get(&id).cloned()
    }

    /// Returns `false` if the handle was not live.
    pub fn release(&self, id: u64) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }
}
