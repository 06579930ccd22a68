//! Expression cost/time estimation.
//!
//! Counts operator occurrences in a free-text arithmetic expression by
//! regex scanning, then prices them. The scan is deliberately naive —
//! it matches substrings, not a parsed grammar — and carries explicit
//! corrections so compound operators are not double-counted: `**` must
//! not count as two `*`, `<=` must not count as `<` plus `=`, and
//! `<=>` over-counts by two through its `<`/`<=`/`>` fragments.
//!
//! Known fragility: identifiers containing operator characters confuse
//! the scan, and a leading minus sign counts as a subtraction. That is
//! the documented behavior, kept as-is.

use std::fmt;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::context::context;
use crate::op::Operation;

/// Rough per-operation price for a trivial completion.
pub const COST_PER_OPERATION: f64 = 0.000_002;

/// Simulated per-operation latency range for dry runs, in ms. Might
/// actually be faster than the real API.
pub const DRY_RUN_LATENCY_MS: std::ops::RangeInclusive<u64> = 500..=2000;

/// Assumed per-operation round-trip when really calling the API, in ms.
pub const API_LATENCY_MS: u64 = 2000;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static DOUBLE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*").expect("static regex"));
static NOT_EQUAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"!=").expect("static regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("static regex"));
static OPERATOR_PATTERNS: Lazy<Vec<(Operation, Regex)>> = Lazy::new(|| {
    Operation::ALL
        .iter()
        .filter(|op| **op != Operation::Pow)
        .map(|op| {
            let pattern = Regex::new(&regex::escape(op.symbol())).expect("static regex");
            (*op, pattern)
        })
        .collect()
});

/// Which pricing figures an estimate used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateMode {
    /// Simulated latency figures.
    DryRun,
    /// Real API round-trip figures.
    Api,
}

impl fmt::Display for EstimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DryRun => f.write_str("dry_run"),
            Self::Api => f.write_str("api"),
        }
    }
}

/// What an expression would cost to evaluate through the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionEstimate {
    /// The expression as given.
    pub expression: String,
    /// Intercepted operations detected by the scan.
    pub operation_count: usize,
    /// `operation_count` × [`COST_PER_OPERATION`], in dollars.
    pub estimated_cost: f64,
    /// Estimated wall-clock time in milliseconds.
    pub estimated_time_ms: u64,
    /// Same, in seconds.
    pub estimated_time_seconds: f64,
    /// Which figures were used.
    pub mode: EstimateMode,
}

/// Count the intercepted operations in a free-text expression.
///
/// `**` is counted first and masked out so it cannot also match as two
/// multiplications; `!=` counts because it routes through the
/// intercepted equality; `<=`, `>=`, and `<=>` each subtract their
/// fragment over-counts. An expression with no operators but at least
/// one digit counts as a single operation.
#[must_use]
pub fn count_operations(expression: &str) -> usize {
    let cleaned = WHITESPACE.replace_all(expression, "").into_owned();

    let mut count = DOUBLE_STAR.find_iter(&cleaned).count() as isize;
    // Mask `**` with a letter so the single-char operators cannot see it.
    let masked = DOUBLE_STAR.replace_all(&cleaned, "p").into_owned();

    for (_, pattern) in OPERATOR_PATTERNS.iter() {
        count += pattern.find_iter(&masked).count() as isize;
    }

    // `!=` routes through the intercepted equality.
    count += NOT_EQUAL.find_iter(&cleaned).count() as isize;

    // `<=` and `>=` each also matched as `<` / `>`.
    count -= cleaned.matches("<=").count() as isize;
    count -= cleaned.matches(">=").count() as isize;
    // `<=>` additionally matched as `<` and `<=`.
    count -= 2 * cleaned.matches("<=>").count() as isize;

    if count > 0 {
        count as usize
    } else if DIGIT.is_match(&cleaned) {
        1
    } else {
        0
    }
}

/// Estimate the cost and wall-clock time of evaluating `expression`
/// through the pipeline, using dry-run or API figures depending on the
/// current configuration.
#[must_use]
pub fn estimate_expression(expression: &str) -> ExpressionEstimate {
    let operation_count = count_operations(expression);
    let dry_run = context().config().dry_run;

    let per_op_ms = if dry_run {
        rand::thread_rng().gen_range(DRY_RUN_LATENCY_MS)
    } else {
        API_LATENCY_MS
    };
    let estimated_time_ms = operation_count as u64 * per_op_ms;

    ExpressionEstimate {
        expression: expression.to_string(),
        operation_count,
        estimated_cost: operation_count as f64 * COST_PER_OPERATION,
        estimated_time_ms,
        estimated_time_seconds: estimated_time_ms as f64 / 1000.0,
        mode: if dry_run {
            EstimateMode::DryRun
        } else {
            EstimateMode::Api
        },
    }
}

/// Render a markdown estimation table for a batch of expressions.
#[must_use]
pub fn format_estimation_table(expressions: &[&str]) -> String {
    let mut out = String::new();
    out.push_str("| Expression | Operations | Est. Time | Cost |\n");
    out.push_str("|------------|------------|-----------|------|\n");
    for expr in expressions {
        let estimate = estimate_expression(expr);
        let display_expr = if expr.chars().count() > 15 {
            let head: String = expr.chars().take(13).collect();
            format!("{head}...")
        } else {
            (*expr).to_string()
        };
        out.push_str(&format!(
            "| {display_expr} | {} | {}ms | {} |\n",
            estimate.operation_count,
            estimate.estimated_time_ms,
            format_cost(estimate.estimated_cost),
        ));
    }
    out
}

/// Format a dollar amount with enough precision to show per-operation
/// prices, trimming trailing zeros but keeping at least two decimals.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    if cost == 0.0 {
        return "$0.00".to_string();
    }

    let mut formatted = format!("{cost:.15}");
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    match formatted.split_once('.').map(|(_, decimals)| decimals.len()) {
        None => formatted.push_str(".00"),
        Some(decimals) if decimals < 2 => {
            for _ in decimals..2 {
                formatted.push('0');
            }
        }
        Some(_) => {}
    }

    format!("${formatted}")
}
