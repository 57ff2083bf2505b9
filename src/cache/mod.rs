//! Per-file classification cache keyed by the base revision.
//!
//! Every cached entry is relative to the single base revision the cache
//! currently holds, so invalidation is wholesale: changing the base clears
//! every entry at once. Individual files are classified at most once per
//! base under normal operation; concurrent `get` calls for the same key may
//! duplicate the retrieval, which is harmless because classification is
//! idempotent for a given base and file state.
//!
//! Retrieval failures are absorbed here: the consumer always gets *some*
//! answer to render, and "no known changes" is the uniform failure shape.

use crate::classify::{LineChange, classify_unified_diff};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Source of raw unified-diff text, one file at a time.
///
/// The production implementation is [`crate::git::GitDiffSource`]; tests
/// substitute in-memory fixtures.
pub trait DiffSource {
    /// Produce the unified diff for `path` against `base`.
    fn diff_text(&self, base: &str, path: &str) -> Result<String>;
}

#[derive(Debug, Default)]
struct CacheState {
    /// Base revision identifier. Opaque: compared, never parsed. Empty
    /// means no base has been set and every lookup short-circuits.
    base: String,
    entries: HashMap<String, Arc<[LineChange]>>,
}

/// Base-keyed store of per-file line classifications.
///
/// Construct one per repository and share it behind an `Arc`; all methods
/// take `&self`.
#[derive(Debug)]
pub struct ChangeCache<S> {
    source: S,
    state: Mutex<CacheState>,
}

impl<S: DiffSource> ChangeCache<S> {
    /// Create a cache with no base revision set.
    ///
    /// Until [`set_base`](Self::set_base) is called, every `get` returns an
    /// empty classification without consulting the source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Create a cache with an initial base revision.
    pub fn with_base(source: S, base: impl Into<String>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState {
                base: base.into(),
                entries: HashMap::new(),
            }),
        }
    }

    /// The base revision entries are currently keyed by.
    pub fn base(&self) -> String {
        self.lock_state().base.clone()
    }

    /// Replace the base revision, clearing every entry if it differs.
    ///
    /// Returns true when the base actually changed; callers use this as the
    /// "full re-render required" signal.
    pub fn set_base(&self, base: &str) -> bool {
        let mut state = self.lock_state();
        if state.base == base {
            return false;
        }
        state.base = base.to_string();
        state.entries.clear();
        true
    }

    /// Drop all entries without changing the base.
    ///
    /// Used for explicit refreshes where the base is unchanged but the
    /// underlying file contents may not be.
    pub fn clear(&self) {
        self.lock_state().entries.clear();
    }

    /// Classification for one file under the current base.
    ///
    /// On a miss the diff is retrieved and classified outside the lock so
    /// unrelated keys are not blocked behind a slow retrieval. The result
    /// is only inserted if the base is still the one it was computed
    /// against; a `set_base` that raced with the computation wins and the
    /// stale result is returned to this caller but not stored.
    ///
    /// Retrieval failure degrades to an empty classification, which is
    /// cached so a failing source is not re-invoked on every call.
    pub fn get(&self, path: &str) -> Arc<[LineChange]> {
        let base = {
            let state = self.lock_state();
            if state.base.is_empty() {
                return empty();
            }
            if let Some(entry) = state.entries.get(path) {
                return Arc::clone(entry);
            }
            state.base.clone()
        };

        let changes: Arc<[LineChange]> = match self.source.diff_text(&base, path) {
            Ok(text) => classify_unified_diff(&text).into(),
            Err(_) => empty(),
        };

        let mut state = self.lock_state();
        if state.base == base {
            state.entries.insert(path.to_string(), Arc::clone(&changes));
        }
        changes
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // A panic while holding the lock leaves plain data behind; poisoning
        // carries no extra meaning here.
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

fn empty() -> Arc<[LineChange]> {
    Vec::new().into()
}
