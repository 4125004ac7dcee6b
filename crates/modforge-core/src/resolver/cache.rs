//! Memoization of resolver output
//!
//! Interactive callers re-resolve on every selection change, so identical
//! inputs must be O(1). Values are immutable `Arc<Resolution>`s, which
//! makes concurrent identical-fingerprint inserts benign.

use crate::resolver::resolution::Resolution;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: usize = 50;

/// Bounded LRU cache keyed by resolve fingerprint
///
/// Injected into the resolver rather than held as a module-level global,
/// so tests can substitute [`ResolutionCache::disabled`].
#[derive(Debug)]
pub struct ResolutionCache {
    inner: Mutex<CacheState>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Arc<Resolution>>,
    /// Keys from least to most recently used
    recency: VecDeque<String>,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheState::default()),
            capacity,
        }
    }

    /// A cache that stores nothing; every lookup misses
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn get(&self, fingerprint: &str) -> Option<Arc<Resolution>> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let value = state.entries.get(fingerprint).cloned()?;
        Self::touch(&mut state.recency, fingerprint);
        Some(value)
    }

    pub fn insert(&self, fingerprint: String, resolution: Arc<Resolution>) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if state.entries.insert(fingerprint.clone(), resolution).is_none() {
            state.recency.push_back(fingerprint);
        } else {
            Self::touch(&mut state.recency, &fingerprint);
        }
        while state.entries.len() > self.capacity {
            if let Some(oldest) = state.recency.pop_front() {
                state.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn touch(recency: &mut VecDeque<String>, fingerprint: &str) {
        if let Some(pos) = recency.iter().position(|k| k == fingerprint) {
            let key = recency.remove(pos).unwrap_or_else(|| fingerprint.to_string());
            recency.push_back(key);
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
