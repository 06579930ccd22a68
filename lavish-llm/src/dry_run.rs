//! Dry-Run Simulator — all of the ceremony, none of the spend.
//!
//! Walks the same logging and cost-accounting path as the remote
//! calculator, then delegates the actual arithmetic to the native
//! operator callback the interception layer supplies. The simulator
//! never alters correctness; its only observable effects versus
//! disabled mode are the log lines, the running cost total, the
//! optional latency sleep, and the cache entries the pipeline makes.

use std::time::Duration;

use tracing::info;

use lavish_core::estimate::{COST_PER_OPERATION, format_cost};
use lavish_core::op::Operation;
use lavish_core::operand::{Operand, Value};
use lavish_core::{LavishError, Result, context, with_native};

use crate::prompt::build_prompt;

/// How long a pretend API round trip takes, when
/// `use_real_delay` is set.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Substitutes the remote call with a simulated one.
#[derive(Default)]
pub struct DryRunSimulator;

impl DryRunSimulator {
    /// Create a simulator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Simulate the operation: log the prompt and the running
    /// simulated cost, optionally sleep the pretend latency, and
    /// return the native callback's result verbatim.
    ///
    /// # Errors
    /// - `LavishError::Configuration` when no native callback is
    ///   supplied — a dry run has nothing else to answer with
    /// - `LavishError::UnsupportedOperation` from prompt building
    pub fn simulate(
        &self,
        op: Operation,
        a: Operand,
        b: Operand,
        native: Option<&dyn Fn() -> Value>,
    ) -> Result<Value> {
        let Some(native) = native else {
            return Err(LavishError::Configuration(
                "dry run mode requires original method".into(),
            ));
        };

        let prompt = build_prompt(op, a, b)?;

        let result = with_native(|| {
            let total = context().add_dry_run_cost(COST_PER_OPERATION);
            info!(
                "DRY RUN: {prompt} (total simulated cost: {})",
                format_cost(total)
            );
            let result = native();
            info!("-> {result}");
            result
        });

        if context().config().use_real_delay {
            std::thread::sleep(SIMULATED_LATENCY);
        }

        Ok(result)
    }
}
