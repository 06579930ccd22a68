//! The calculation pipeline: cache → simulator/calculator → fallback.
//!
//! One entry point, [`evaluate`], shared by every operator the wrapper
//! intercepts. It is infallible by contract: any pipeline error is
//! logged as a warning and answered with the native callback instead.
//! Retries happen inside the remote calculator, never here.

use once_cell::sync::Lazy;
use tracing::{info, warn};

use lavish_core::cache::CacheKey;
use lavish_core::op::Operation;
use lavish_core::operand::{Operand, Value};
use lavish_core::{Result, context, with_native};
use lavish_llm::{DryRunSimulator, RemoteCalculator};

/// One HTTP client for the whole process; connection reuse is the
/// closest this library gets to efficiency.
static CALCULATOR: Lazy<RemoteCalculator> = Lazy::new(RemoteCalculator::new);

/// Evaluate an operation through the pipeline, falling back to the
/// native callback on any failure.
///
/// The caller is responsible for checking enablement first; by the
/// time this runs, interception has been decided.
pub fn evaluate(op: Operation, a: Operand, b: Operand, native: &dyn Fn() -> Value) -> Value {
    match try_evaluate(op, a, b, native) {
        Ok(value) => value,
        Err(err) => {
            with_native(|| warn!("LLM failed ({err}), falling back to CPU calculation"));
            native()
        }
    }
}

fn try_evaluate(op: Operation, a: Operand, b: Operand, native: &dyn Fn() -> Value) -> Result<Value> {
    let cfg = context().config();

    let key = CacheKey::new(op, a, b);
    if let Some(hit) = context().cache().lookup(&key) {
        if cfg.log_cache_hits {
            with_native(|| info!(%key, "cache hit"));
        }
        return Ok(hit);
    }

    let result = if cfg.dry_run {
        DryRunSimulator::new().simulate(op, a, b, Some(native))?
    } else {
        CALCULATOR.calculate(op, a, b)?
    };

    context().cache().store(key, result);
    Ok(result)
}
