//! Prompt templates for outsourced arithmetic.
//!
//! The most wasteful, expensive, and completely inefficient
//! mathematical notation known to humanity. Each operator maps to a
//! natural-language prefix; the per-family templates add the phrasing
//! that coaxes a parseable one-token answer out of the model.

use lavish_core::op::{OpFamily, Operation};
use lavish_core::operand::Operand;
use lavish_core::{LavishError, Result, with_native};

/// Operator → prompt prefix. The sole source of truth for which
/// operations the pipeline supports.
pub const PROMPT_TABLE: &[(Operation, &str)] = &[
    (Operation::Add, "What is the sum of"),
    (Operation::Sub, "What is the difference when subtracting"),
    (Operation::Mul, "What is the product of"),
    (Operation::Div, "What is the result of dividing"),
    (Operation::Rem, "What is the remainder when dividing"),
    (Operation::Pow, "What is the result of raising"),
    (Operation::Eq, "Are these two numbers equal:"),
    (Operation::Lt, "Is the first number less than the second:"),
    (Operation::Gt, "Is the first number greater than the second:"),
    (
        Operation::Le,
        "Is the first number less than or equal to the second:",
    ),
    (
        Operation::Ge,
        "Is the first number greater than or equal to the second:",
    ),
    (
        Operation::Cmp,
        "Compare these two numbers (-1 if first is smaller, 0 if equal, 1 if first is larger):",
    ),
];

/// Arithmetic phrasing for operators that read naturally as "A and B".
const ARITHMETIC_TEMPLATE: &str = "{prefix} {a} and {b}? Return the result as a single number.";
/// Division names its operands explicitly.
const DIVISION_TEMPLATE: &str = "{prefix} {a} by {b}? Return the result as a single number.";
/// Modulo asks for the remainder.
const REMAINDER_TEMPLATE: &str = "{prefix} {a} by {b}? Return the remainder as a single number.";
/// Exponentiation spells out base and exponent.
const POWER_TEMPLATE: &str =
    "{prefix} {a} to the power of {b}? Return the result as a single number.";
/// Equality and ordering want a bare boolean.
const PREDICATE_TEMPLATE: &str = "{prefix} {a} and {b}? Answer only 'true' or 'false'.";
/// Three-way compare; the prefix already explains the encoding.
const THREE_WAY_TEMPLATE: &str = "{prefix} {a} and {b}.";

/// The prompt prefix for an operator, if the table has one.
#[must_use]
pub fn prompt_prefix(op: Operation) -> Option<&'static str> {
    PROMPT_TABLE
        .iter()
        .find(|(entry, _)| *entry == op)
        .map(|(_, prefix)| *prefix)
}

/// Simple template interpolation: replaces `{key}` with its value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Build the full prompt for an operation and operand pair.
///
/// Runs under the suppression guard: formatting operands must never
/// re-enter the interception layer.
///
/// # Errors
/// `LavishError::UnsupportedOperation` if the operator has no entry in
/// [`PROMPT_TABLE`].
pub fn build_prompt(op: Operation, a: Operand, b: Operand) -> Result<String> {
    with_native(|| {
        let prefix = prompt_prefix(op).ok_or(LavishError::UnsupportedOperation(op))?;
        let template = match op {
            Operation::Pow => POWER_TEMPLATE,
            Operation::Div => DIVISION_TEMPLATE,
            Operation::Rem => REMAINDER_TEMPLATE,
            Operation::Cmp => THREE_WAY_TEMPLATE,
            _ => match op.family() {
                OpFamily::Predicate => PREDICATE_TEMPLATE,
                OpFamily::Arithmetic | OpFamily::ThreeWay => ARITHMETIC_TEMPLATE,
            },
        };
        Ok(render_template(
            template,
            &[
                ("prefix", prefix),
                ("a", &a.to_string()),
                ("b", &b.to_string()),
            ],
        ))
    })
}
