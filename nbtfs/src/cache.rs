//! Memoised leaf renderings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::trace;

use crate::error::Result;

/// A write-once map from virtual path to its rendered text.
///
/// Entries are never invalidated or evicted. This is only sound because the
/// tree behind a [`Document`][`crate::Document`] is immutable, and the cache
/// can grow at most to one entry per leaf in that tree.
///
/// Rendering happens outside the lock, so two threads missing on the same
/// path at once may both render it. Only one result is stored and both
/// callers get the stored one back.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached rendering of `path`, if there is one.
    pub fn get(&self, path: &str) -> Option<Arc<str>> {
        self.lock().get(path).cloned()
    }

    /// Return the cached rendering of `path`, or produce one with `render`
    /// and store it. Errors from `render` are returned and not cached.
    pub fn get_or_render<F>(&self, path: &str, render: F) -> Result<Arc<str>>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(hit) = self.get(path) {
            trace!("cache hit: {}", path);
            return Ok(hit);
        }

        trace!("cache miss: {}", path);
        let rendered: Arc<str> = render()?.into();

        let stored = self
            .lock()
            .entry(path.to_owned())
            .or_insert(rendered)
            .clone();
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<str>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
