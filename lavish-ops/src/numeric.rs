//! The `Numeric` trait family — native implementations, always
//! reachable.
//!
//! Every supported kind keeps its original operator implementations
//! callable through these traits, no matter what the interception
//! layer is doing. This is the wrapper-type equivalent of aliasing
//! every original method before installing any override.

use std::cmp::Ordering;
use std::fmt;

use num_complex::Complex64;
use num_rational::{Ratio, Rational64};
use num_traits::ToPrimitive;

use lavish_core::operand::{NumericKind, Operand, Value};

/// A numeric kind the interception layer supports.
///
/// Implementations provide conversion to and from the pipeline's
/// [`Operand`]/[`Value`] model plus the native (CPU) implementation of
/// every arithmetic operator the kind has.
pub trait Numeric: Copy + PartialEq + fmt::Debug + fmt::Display + 'static {
    /// Result kind of division. Integers divide to floats; everything
    /// else divides to itself.
    type Div: Numeric;

    /// The kind tag carried into prompts and cache keys.
    const KIND: NumericKind;

    /// Wrap into the pipeline's operand model.
    fn to_operand(self) -> Operand;

    /// Extract from a pipeline result, if the kinds line up.
    fn from_value(value: Value) -> Option<Self>;

    /// Native `+`.
    fn native_add(self, rhs: Self) -> Self;
    /// Native `-`.
    fn native_sub(self, rhs: Self) -> Self;
    /// Native `*`.
    fn native_mul(self, rhs: Self) -> Self;
    /// Native `/`.
    fn native_div(self, rhs: Self) -> Self::Div;
    /// Native exponentiation.
    fn native_pow(self, rhs: Self) -> Self;
}

/// Kinds that support `%`. Complex numbers don't.
pub trait NativeRem: Numeric {
    /// Native `%`.
    fn native_rem(self, rhs: Self) -> Self;
}

/// Kinds with an order, for `< > <= >= <=>`. Complex numbers don't
/// have one.
pub trait OrderedNumeric: Numeric + PartialOrd {
    /// Native three-way compare as {-1, 0, 1}. NaN pairs land on 0.
    fn native_cmp(self, rhs: Self) -> i8 {
        match self.partial_cmp(&rhs) {
            Some(Ordering::Less) => -1,
            Some(Ordering::Greater) => 1,
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// i64
// ---------------------------------------------------------------------------

impl Numeric for i64 {
    type Div = f64;
    const KIND: NumericKind = NumericKind::Int;

    fn to_operand(self) -> Operand {
        Operand::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Num(Operand::Int(v)) => Some(v),
            _ => None,
        }
    }

    fn native_add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn native_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn native_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn native_div(self, rhs: Self) -> f64 {
        // Division always produces a float, even for integer operands.
        self as f64 / rhs as f64
    }

    fn native_pow(self, rhs: Self) -> Self {
        // Integer semantics: negative exponents truncate to zero,
        // overflow saturates.
        u32::try_from(rhs).map_or(0, |exp| self.checked_pow(exp).unwrap_or(i64::MAX))
    }
}

impl NativeRem for i64 {
    fn native_rem(self, rhs: Self) -> Self {
        self % rhs
    }
}

impl OrderedNumeric for i64 {}

// ---------------------------------------------------------------------------
// f64
// ---------------------------------------------------------------------------

impl Numeric for f64 {
    type Div = f64;
    const KIND: NumericKind = NumericKind::Float;

    fn to_operand(self) -> Operand {
        Operand::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Num(Operand::Float(v)) => Some(v),
            Value::Num(Operand::Int(v)) => Some(v as f64),
            _ => None,
        }
    }

    fn native_add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn native_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn native_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn native_div(self, rhs: Self) -> f64 {
        self / rhs
    }

    fn native_pow(self, rhs: Self) -> Self {
        self.powf(rhs)
    }
}

impl NativeRem for f64 {
    fn native_rem(self, rhs: Self) -> Self {
        self % rhs
    }
}

impl OrderedNumeric for f64 {}

// ---------------------------------------------------------------------------
// Rational64
// ---------------------------------------------------------------------------

impl Numeric for Rational64 {
    type Div = Rational64;
    const KIND: NumericKind = NumericKind::Rational;

    fn to_operand(self) -> Operand {
        Operand::Rational(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Num(Operand::Rational(v)) => Some(v),
            _ => None,
        }
    }

    fn native_add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn native_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn native_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn native_div(self, rhs: Self) -> Rational64 {
        self / rhs
    }

    fn native_pow(self, rhs: Self) -> Self {
        if rhs.is_integer() {
            if let Ok(exp) = i32::try_from(rhs.to_integer()) {
                return self.pow(exp);
            }
        }
        // Fractional or oversized exponent: approximate through floats.
        let base = self.to_f64().unwrap_or(0.0);
        let exp = rhs.to_f64().unwrap_or(0.0);
        Ratio::approximate_float(base.powf(exp)).unwrap_or_else(|| Ratio::from_integer(0))
    }
}

impl NativeRem for Rational64 {
    fn native_rem(self, rhs: Self) -> Self {
        self % rhs
    }
}

impl OrderedNumeric for Rational64 {}

// ---------------------------------------------------------------------------
// Complex64 — no remainder, no ordering
// ---------------------------------------------------------------------------

impl Numeric for Complex64 {
    type Div = Complex64;
    const KIND: NumericKind = NumericKind::Complex;

    fn to_operand(self) -> Operand {
        Operand::Complex(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Num(Operand::Complex(v)) => Some(v),
            _ => None,
        }
    }

    fn native_add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn native_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn native_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    fn native_div(self, rhs: Self) -> Complex64 {
        self / rhs
    }

    fn native_pow(self, rhs: Self) -> Self {
        self.powc(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_floats() {
        assert_eq!(7i64.native_div(2), 3.5);
    }

    #[test]
    fn integer_power() {
        assert_eq!(2i64.native_pow(8), 256);
        assert_eq!(2i64.native_pow(-1), 0);
        assert_eq!(2i64.native_pow(i64::from(u32::MAX) + 1), 0);
    }

    #[test]
    fn rational_power_with_integer_exponent_is_exact() {
        let half = Rational64::new(1, 2);
        assert_eq!(half.native_pow(Rational64::from_integer(3)), Rational64::new(1, 8));
    }

    #[test]
    fn three_way_defaults() {
        assert_eq!(2i64.native_cmp(3), -1);
        assert_eq!(3i64.native_cmp(3), 0);
        assert_eq!(4i64.native_cmp(3), 1);
        assert_eq!(f64::NAN.native_cmp(1.0), 0);
    }

    #[test]
    fn complex_round_trips_through_value() {
        let c = Complex64::new(1.0, 2.0);
        assert_eq!(Complex64::from_value(Value::Num(c.to_operand())), Some(c));
        assert_eq!(Complex64::from_value(Value::Bool(true)), None);
    }
}
