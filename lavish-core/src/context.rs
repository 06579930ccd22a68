//! Process-wide shared state: enablement, suppression, cache, and the
//! running dry-run cost.
//!
//! Modeled as one explicit context object behind a lazy static rather
//! than scattered module-level globals, so tests (and the one user who
//! embeds this twice) have a single place to reset.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};

use crate::cache::ResultCache;
use crate::config::LavishConfig;

static CONTEXT: Lazy<LavishContext> = Lazy::new(LavishContext::new);

thread_local! {
    /// Per-thread suppression flag. Thread-local so concurrent callers
    /// cannot corrupt each other's re-entrancy guard.
    static SUPPRESSED: Cell<bool> = const { Cell::new(false) };
}

/// The process-wide Lavish context.
pub struct LavishContext {
    config: RwLock<LavishConfig>,
    active: AtomicBool,
    cache: ResultCache,
    dry_run_cost: Mutex<f64>,
}

impl LavishContext {
    fn new() -> Self {
        Self {
            config: RwLock::new(LavishConfig::default()),
            active: AtomicBool::new(false),
            cache: ResultCache::new(),
            dry_run_cost: Mutex::new(0.0),
        }
    }

    /// Snapshot the current configuration.
    #[must_use]
    pub fn config(&self) -> LavishConfig {
        self.config.read().clone()
    }

    /// Mutate the configuration through a callback.
    pub fn configure(&self, f: impl FnOnce(&mut LavishConfig)) {
        f(&mut self.config.write());
    }

    /// Turn interception on. Idempotent.
    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    /// Turn interception off. Idempotent.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether [`LavishContext::activate`] has been called.
    #[must_use]
    pub fn activated(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Activated and not suppressed on the current thread.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.activated() && !suppressed()
    }

    /// The shared result cache.
    #[must_use]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Add a per-call estimate to the simulated spend; returns the new
    /// running total.
    pub fn add_dry_run_cost(&self, delta: f64) -> f64 {
        let mut total = self.dry_run_cost.lock();
        *total += delta;
        *total
    }

    /// The running simulated spend.
    #[must_use]
    pub fn dry_run_cost(&self) -> f64 {
        *self.dry_run_cost.lock()
    }

    /// Reset the simulated spend to zero.
    pub fn reset_dry_run_cost(&self) {
        *self.dry_run_cost.lock() = 0.0;
    }
}

/// The process-wide context instance.
#[must_use]
pub fn context() -> &'static LavishContext {
    &CONTEXT
}

/// Whether the current thread holds a [`NativeGuard`].
#[must_use]
pub fn suppressed() -> bool {
    SUPPRESSED.with(Cell::get)
}

/// RAII suppression scope: while alive, interception is off for the
/// current thread. Restores the previous flag value on drop, even when
/// dropped during a panic — nesting is safe.
///
/// The pipeline holds one of these around its own bookkeeping (cache
/// key formatting, logging, backoff sleeps) so it can never intercept
/// itself into infinite recursion.
pub struct NativeGuard {
    prev: bool,
}

impl NativeGuard {
    /// Begin a suppression scope on the current thread.
    #[must_use]
    pub fn new() -> Self {
        let prev = SUPPRESSED.with(|flag| flag.replace(true));
        Self { prev }
    }
}

impl Default for NativeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NativeGuard {
    fn drop(&mut self) {
        SUPPRESSED.with(|flag| flag.set(self.prev));
    }
}

/// Run `f` with interception suppressed on the current thread.
pub fn with_native<T>(f: impl FnOnce() -> T) -> T {
    let _guard = NativeGuard::new();
    f()
}
