//! # lavish-ops — operator interception
//!
//! The user-facing layer of Lavish: wrap a number in [`Lavish`] and
//! its arithmetic and comparison operators are transparently routed
//! through the calculation pipeline — cache first, then the dry-run
//! simulator or the remote model, with silent fallback to the CPU when
//! anything goes wrong.
//!
//! ```no_run
//! use lavish_ops::lavish;
//!
//! lavish_ops::configure(|cfg| cfg.dry_run = true);
//! lavish_ops::activate();
//!
//! let sum = lavish(2i64) + lavish(3);
//! assert_eq!(sum.into_inner(), 5); // eventually
//! ```
//!
//! Rust has no monkey-patching, which is the one mercy in this design:
//! instead of rewriting `i64`'s operators in place (and aliasing the
//! originals first so overrides never shadow each other), the native
//! implementation is simply always reachable through the [`Numeric`]
//! trait, and [`Lavish`] forwards to it whenever interception is
//! disabled, suppressed, or broken. Patch ordering problems cannot
//! exist here by construction.
//!
//! Supported numeric kinds: `i64`, `f64`, `Rational64`, `Complex64`.
//! Operators a kind doesn't have are simply absent from the wrapper
//! (complex numbers have no ordering and no remainder).

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod numeric;
pub mod pipeline;
pub mod wrapper;

pub use numeric::{NativeRem, Numeric, OrderedNumeric};
pub use wrapper::{Lavish, lavish};

// The configuration and enablement surface, re-exported so most users
// never import lavish-core directly.
pub use lavish_core::signal::install_signal_handlers;
pub use lavish_core::{activate, activated, configure, deactivate, enabled, with_native};
