//! # lavish-llm — the expensive half of Lavish
//!
//! Everything that talks to (or pretends to talk to) the model lives
//! here:
//!
//! - [`prompt`] — the operator→prompt table and the per-family prompt
//!   builders ("What is the sum of 2 and 3? Return the result as a
//!   single number.")
//! - [`client::RemoteCalculator`] — issues the chat-completion
//!   request with deterministic sampling, retries transient failures
//!   with exponential backoff and jitter, and parses the short textual
//!   answer back into a typed [`lavish_core::Value`]
//! - [`dry_run::DryRunSimulator`] — exercises the same logging and
//!   cost-accounting paths without spending anything, delegating the
//!   actual arithmetic to the native operator it was handed
//!
//! Nothing in this crate touches the cache or decides fallback —
//! that's `lavish-ops`' job. This crate either produces a [`Value`]
//! or reports exactly why it couldn't.
//!
//! [`Value`]: lavish_core::Value

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod dry_run;
pub mod prompt;

pub use client::RemoteCalculator;
pub use dry_run::DryRunSimulator;
