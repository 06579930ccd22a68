//! Operands, numeric kinds, and computed values.
//!
//! The operand's runtime kind determines result-type coercion: an
//! integer answer stays an integer unless the operation was division
//! or the other operand was a float; rationals and complex numbers
//! wrap the model's floating-point answer back into their own kind.

use std::fmt;

use num_complex::Complex64;
use num_rational::{Ratio, Rational64};
use num_traits::ToPrimitive;

use crate::op::Operation;

/// The four numeric kinds the interception layer supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// `i64`
    Int,
    /// `f64`
    Float,
    /// `num_rational::Rational64`
    Rational,
    /// `num_complex::Complex64`
    Complex,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Rational => "Rational",
            Self::Complex => "Complex",
        };
        f.write_str(name)
    }
}

/// A numeric value carrying its runtime kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// A machine integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// An exact ratio of two `i64`s.
    Rational(Rational64),
    /// A complex number with `f64` parts.
    Complex(Complex64),
}

impl Operand {
    /// The operand's kind tag.
    #[must_use]
    pub fn kind(self) -> NumericKind {
        match self {
            Self::Int(_) => NumericKind::Int,
            Self::Float(_) => NumericKind::Float,
            Self::Rational(_) => NumericKind::Rational,
            Self::Complex(_) => NumericKind::Complex,
        }
    }

    /// Coerce a raw floating-point answer from the model back into the
    /// kind implied by this operand pair.
    ///
    /// Policy (see also the parser tests in `lavish-llm`):
    /// - Int op Int → Int, except division (always float) and a float
    ///   on the other side
    /// - Float anywhere → Float
    /// - Rational / Complex wrap the raw float into their own kind
    ///
    /// Returns `None` when the raw answer cannot be represented in the
    /// target kind (e.g. NaN as a rational).
    #[must_use]
    pub fn coerce(raw: f64, op: Operation, a: Operand, b: Operand) -> Option<Operand> {
        match a {
            Operand::Int(_) => {
                if op == Operation::Div || matches!(b, Operand::Float(_)) {
                    Some(Operand::Float(raw))
                } else if raw.is_finite() {
                    // Truncate like a cast; "5.0" from the model is the
                    // integer 5.
                    Some(Operand::Int(raw as i64))
                } else {
                    None
                }
            }
            Operand::Float(_) => Some(Operand::Float(raw)),
            Operand::Rational(_) => Ratio::approximate_float(raw).map(Operand::Rational),
            Operand::Complex(_) => Some(Operand::Complex(Complex64::new(raw, 0.0))),
        }
    }

    /// The operand as a plain `f64`, when one exists.
    #[must_use]
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            Self::Rational(v) => v.to_f64(),
            Self::Complex(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    /// Plain, deterministic rendering used for prompts and cache keys.
    /// This goes straight to the inner types' formatting and never
    /// touches the interception layer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Rational(v) => write!(f, "{v}"),
            Self::Complex(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Rational64> for Operand {
    fn from(v: Rational64) -> Self {
        Self::Rational(v)
    }
}

impl From<Complex64> for Operand {
    fn from(v: Complex64) -> Self {
        Self::Complex(v)
    }
}

/// A computed (or cached) result: numeric, boolean, or a three-way
/// comparison ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Result of an arithmetic operation.
    Num(Operand),
    /// Result of an equality/ordering predicate.
    Bool(bool),
    /// Result of a three-way compare, always in {-1, 0, 1}.
    Order(i8),
}

impl Value {
    /// The boolean payload, if this is a predicate result.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// The ordinal payload, if this is a three-way result.
    #[must_use]
    pub fn as_order(self) -> Option<i8> {
        match self {
            Self::Order(v) => Some(v),
            _ => None,
        }
    }

    /// The numeric payload, if this is an arithmetic result.
    #[must_use]
    pub fn as_num(self) -> Option<Operand> {
        match self {
            Self::Num(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Order(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_arithmetic_stays_int() {
        let coerced = Operand::coerce(5.0, Operation::Add, Operand::Int(2), Operand::Int(3));
        assert_eq!(coerced, Some(Operand::Int(5)));
    }

    #[test]
    fn int_division_is_always_float() {
        let coerced = Operand::coerce(3.5, Operation::Div, Operand::Int(7), Operand::Int(2));
        assert_eq!(coerced, Some(Operand::Float(3.5)));
    }

    #[test]
    fn float_on_either_side_floats_the_result() {
        let coerced = Operand::coerce(5.5, Operation::Add, Operand::Int(2), Operand::Float(3.5));
        assert_eq!(coerced, Some(Operand::Float(5.5)));
    }

    #[test]
    fn rational_wraps_back_into_rational() {
        let half = Rational64::new(1, 2);
        let coerced = Operand::coerce(0.75, Operation::Add, Operand::Rational(half), Operand::Rational(half));
        assert_eq!(coerced, Some(Operand::Rational(Rational64::new(3, 4))));
    }

    #[test]
    fn complex_wraps_back_into_complex() {
        let c = Complex64::new(1.0, 2.0);
        let coerced = Operand::coerce(4.0, Operation::Mul, Operand::Complex(c), Operand::Complex(c));
        assert_eq!(coerced, Some(Operand::Complex(Complex64::new(4.0, 0.0))));
    }

    #[test]
    fn nan_cannot_become_an_int() {
        let coerced = Operand::coerce(f64::NAN, Operation::Add, Operand::Int(1), Operand::Int(1));
        assert_eq!(coerced, None);
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Operand::Int(42).to_string(), "42");
        assert_eq!(Operand::Rational(Rational64::new(1, 3)).to_string(), "1/3");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Order(-1).to_string(), "-1");
    }
}
