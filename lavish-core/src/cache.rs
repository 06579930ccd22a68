//! Process-wide result memoization.
//!
//! One cache, shared by every calculator instance, keyed by
//! `(operation, kind of a, a, kind of b, b)`. No eviction, no TTL, no
//! size bound: an accepted limitation of the design, not an oversight.
//! A process that computes enough *distinct* sums to exhaust memory
//! has worse problems than this library.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

use crate::context::with_native;
use crate::op::Operation;
use crate::operand::{Operand, Value};

/// Deterministic identity for a memoized result.
///
/// Equal inputs always produce the same key. The rendering runs under
/// a suppression guard so building a key can never re-enter the
/// interception layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for an operation and operand pair.
    #[must_use]
    pub fn new(op: Operation, a: Operand, b: Operand) -> Self {
        with_native(|| Self(format!("{op}:{}:{a}:{}:{b}", a.kind(), b.kind())))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unbounded map of cache keys to computed values.
#[derive(Default)]
pub struct ResultCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl ResultCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously stored result.
    #[must_use]
    pub fn lookup(&self, key: &CacheKey) -> Option<Value> {
        self.entries.lock().get(key).copied()
    }

    /// Store a computed result. Last write wins.
    pub fn store(&self, key: CacheKey, value: Value) {
        self.entries.lock().insert(key, value);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of memoized results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
