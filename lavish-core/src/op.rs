//! The closed set of intercepted operators.

use std::fmt;
use std::str::FromStr;

/// An intercepted operator. Fixed, closed set — adding one means
/// adding a prompt template and a native hook everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b` — always produces a float for integer operands.
    Div,
    /// `a % b`
    Rem,
    /// `a.pow(b)`
    Pow,
    /// `a == b`
    Eq,
    /// `a < b`
    Lt,
    /// `a > b`
    Gt,
    /// `a <= b`
    Le,
    /// `a >= b`
    Ge,
    /// Three-way compare, clamped to {-1, 0, 1}.
    Cmp,
}

/// How an operation's answer is shaped, which drives both prompt
/// phrasing and response parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFamily {
    /// Numeric in, numeric out (`+ - * / % **`).
    Arithmetic,
    /// Numeric in, "true"/"false" out (`== < > <= >=`).
    Predicate,
    /// Numeric in, {-1, 0, 1} out (`<=>`).
    ThreeWay,
}

impl Operation {
    /// Every operation, in the estimator's scanning order.
    pub const ALL: [Operation; 12] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Rem,
        Operation::Pow,
        Operation::Eq,
        Operation::Lt,
        Operation::Gt,
        Operation::Le,
        Operation::Ge,
        Operation::Cmp,
    ];

    /// The operator's source-level symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Cmp => "<=>",
        }
    }

    /// Which result family this operation belongs to.
    #[must_use]
    pub fn family(self) -> OpFamily {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem | Self::Pow => {
                OpFamily::Arithmetic
            }
            Self::Eq | Self::Lt | Self::Gt | Self::Le | Self::Ge => OpFamily::Predicate,
            Self::Cmp => OpFamily::ThreeWay,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            "%" => Ok(Self::Rem),
            "**" => Ok(Self::Pow),
            "==" => Ok(Self::Eq),
            "<" => Ok(Self::Lt),
            ">" => Ok(Self::Gt),
            "<=" => Ok(Self::Le),
            ">=" => Ok(Self::Ge),
            "<=>" => Ok(Self::Cmp),
            _ => Err(format!("unknown operator symbol: '{s}'")),
        }
    }
}
