//! The `Lavish<T>` wrapper — numbers that phone home.
//!
//! Implements the std operator traits by delegating to the pipeline,
//! with the native implementation captured as the fallback callback.
//! When interception is off (never activated, deactivated, or
//! suppressed on this thread) every operator is a direct native call:
//! no network, no cache, no logging.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};

use tracing::warn;

use lavish_core::op::Operation;
use lavish_core::operand::Value;
use lavish_core::with_native;

use crate::numeric::{NativeRem, Numeric, OrderedNumeric};
use crate::pipeline;

/// A numeric value whose operators are routed through the calculation
/// pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Lavish<T: Numeric>(T);

/// Wrap a number. Shorthand for [`Lavish::new`].
pub fn lavish<T: Numeric>(value: T) -> Lavish<T> {
    Lavish::new(value)
}

impl<T: Numeric> Lavish<T> {
    /// Wrap a number.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwrap back to the plain value.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Exponentiation. No std trait exists for `**`, so this is an
    /// inherent method.
    #[must_use]
    pub fn pow(self, exp: Self) -> Self {
        Self(arithmetic(Operation::Pow, self.0, exp.0, T::native_pow))
    }
}

impl<T: OrderedNumeric> Lavish<T> {
    /// Three-way compare through the pipeline, clamped to {-1, 0, 1}.
    #[must_use]
    pub fn cmp_expensive(&self, other: &Self) -> i8 {
        if !lavish_core::enabled() {
            return self.0.native_cmp(other.0);
        }
        let (lhs, rhs) = (self.0, other.0);
        let value = pipeline::evaluate(
            Operation::Cmp,
            lhs.to_operand(),
            rhs.to_operand(),
            &|| Value::Order(lhs.native_cmp(rhs)),
        );
        value.as_order().unwrap_or_else(|| {
            mismatch(Operation::Cmp);
            lhs.native_cmp(rhs)
        })
    }
}

impl<T: Numeric> From<T> for Lavish<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Numeric> fmt::Display for Lavish<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The pipeline answered with a value of the wrong shape (a boolean
/// for an addition, say). Treated like any other failure: warn and use
/// the CPU.
fn mismatch(op: Operation) {
    with_native(|| warn!("result kind mismatch for {op}, using native result"));
}

/// Shared plumbing for the arithmetic operators. `R` differs from `T`
/// only for division.
fn arithmetic<T: Numeric, R: Numeric>(
    op: Operation,
    lhs: T,
    rhs: T,
    native: impl Fn(T, T) -> R,
) -> R {
    if !lavish_core::enabled() {
        return native(lhs, rhs);
    }
    let value = pipeline::evaluate(op, lhs.to_operand(), rhs.to_operand(), &|| {
        Value::Num(native(lhs, rhs).to_operand())
    });
    R::from_value(value).unwrap_or_else(|| {
        mismatch(op);
        native(lhs, rhs)
    })
}

/// Shared plumbing for the boolean comparison operators.
fn predicate<T: Numeric>(op: Operation, lhs: T, rhs: T, native: impl Fn(T, T) -> bool) -> bool {
    if !lavish_core::enabled() {
        return native(lhs, rhs);
    }
    let value = pipeline::evaluate(op, lhs.to_operand(), rhs.to_operand(), &|| {
        Value::Bool(native(lhs, rhs))
    });
    value.as_bool().unwrap_or_else(|| {
        mismatch(op);
        native(lhs, rhs)
    })
}

impl<T: Numeric> Add for Lavish<T> {
    type Output = Lavish<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Lavish(arithmetic(Operation::Add, self.0, rhs.0, T::native_add))
    }
}

impl<T: Numeric> Sub for Lavish<T> {
    type Output = Lavish<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Lavish(arithmetic(Operation::Sub, self.0, rhs.0, T::native_sub))
    }
}

impl<T: Numeric> Mul for Lavish<T> {
    type Output = Lavish<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        Lavish(arithmetic(Operation::Mul, self.0, rhs.0, T::native_mul))
    }
}

impl<T: Numeric> Div for Lavish<T> {
    /// Division changes kind for integers: `Lavish<i64> / Lavish<i64>`
    /// is `Lavish<f64>`, because the answer to "7 divided by 2" is
    /// 3.5 no matter how it was asked.
    type Output = Lavish<T::Div>;

    fn div(self, rhs: Self) -> Self::Output {
        Lavish(arithmetic(Operation::Div, self.0, rhs.0, T::native_div))
    }
}

impl<T: NativeRem> Rem for Lavish<T> {
    type Output = Lavish<T>;

    fn rem(self, rhs: Self) -> Self::Output {
        Lavish(arithmetic(Operation::Rem, self.0, rhs.0, T::native_rem))
    }
}

impl<T: Numeric> PartialEq for Lavish<T> {
    fn eq(&self, other: &Self) -> bool {
        predicate(Operation::Eq, self.0, other.0, |a, b| a == b)
    }
}

impl<T: OrderedNumeric> PartialOrd for Lavish<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_expensive(other) {
            -1 => Some(Ordering::Less),
            0 => Some(Ordering::Equal),
            _ => Some(Ordering::Greater),
        }
    }

    fn lt(&self, other: &Self) -> bool {
        predicate(Operation::Lt, self.0, other.0, |a, b| a < b)
    }

    fn le(&self, other: &Self) -> bool {
        predicate(Operation::Le, self.0, other.0, |a, b| a <= b)
    }

    fn gt(&self, other: &Self) -> bool {
        predicate(Operation::Gt, self.0, other.0, |a, b| a > b)
    }

    fn ge(&self, other: &Self) -> bool {
        predicate(Operation::Ge, self.0, other.0, |a, b| a >= b)
    }
}
