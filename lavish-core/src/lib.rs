//! # Lavish Core Library
//!
//! The domain model for Lavish, a library that outsources primitive
//! arithmetic to a large language model. This crate knows nothing about
//! HTTP — it owns the pieces every other crate shares:
//!
//! - **Operations & operands** — the closed set of twelve intercepted
//!   operators and the four supported numeric kinds ([`Operation`],
//!   [`Operand`], [`Value`])
//! - **Result cache** — process-wide memoization of answers
//!   ([`ResultCache`])
//! - **Process context** — activation toggle, thread-local suppression
//!   guard, running dry-run cost ([`context`], [`with_native`])
//! - **Configuration** — API credentials, endpoint, model, dry-run
//!   knobs ([`LavishConfig`])
//! - **Expression estimator** — how much will that arithmetic cost you
//!   ([`estimate::estimate_expression`])
//!
//! ## A note on seriousness
//!
//! None of this should exist. A CPU computes `2 + 3` in under a
//! nanosecond for roughly no money. Lavish does it in two seconds for
//! $0.000002, plus a cache so the second `2 + 3` is merely slow to
//! look up. The engineering is real; the premise is not.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod estimate;
pub mod op;
pub mod operand;
pub mod signal;

pub use cache::{CacheKey, ResultCache};
pub use config::LavishConfig;
pub use context::{LavishContext, NativeGuard, context, with_native};
pub use error::{LavishError, Result};
pub use op::{OpFamily, Operation};
pub use operand::{NumericKind, Operand, Value};

/// Mutate the global configuration through a callback.
///
/// Intended to be called once at startup, before [`activate`]:
///
/// ```
/// lavish_core::configure(|cfg| {
///     cfg.api_key = Some("sk-...".into());
///     cfg.dry_run = false;
/// });
/// ```
pub fn configure(f: impl FnOnce(&mut LavishConfig)) {
    context().configure(f);
}

/// Turn interception on. Idempotent.
pub fn activate() {
    context().activate();
}

/// Turn interception off. Idempotent.
///
/// Unlike the monkey-patching original, nothing needs to be unpatched:
/// the wrapper type simply starts calling native operators directly.
pub fn deactivate() {
    context().deactivate();
}

/// Whether [`activate`] has been called (ignores suppression).
pub fn activated() -> bool {
    context().activated()
}

/// Whether interception is live for the current thread: activated
/// globally and not suppressed by a [`NativeGuard`].
pub fn enabled() -> bool {
    context().enabled()
}
