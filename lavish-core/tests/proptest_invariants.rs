//! Property-based tests for the core invariants.
//!
//! Covers the pieces with real input spaces: the estimator's scan, the
//! cache key derivation, and the cost formatter.

use proptest::prelude::*;

use lavish_core::cache::{CacheKey, ResultCache};
use lavish_core::estimate::{count_operations, format_cost};
use lavish_core::op::Operation;
use lavish_core::operand::{Operand, Value};

// ---------------------------------------------------------------------------
// Estimator: whitespace never changes the count
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn count_ignores_whitespace(pad in "[ \t\n]{0,3}") {
        let spaced = format!("2{pad}+{pad}3{pad}*{pad}4");
        prop_assert_eq!(count_operations(&spaced), count_operations("2+3*4"));
    }

    #[test]
    fn count_of_repeated_additions(n in 1usize..20) {
        // "1+1+...+1" with n plus signs.
        let expr = std::iter::repeat("1").take(n + 1).collect::<Vec<_>>().join("+");
        prop_assert_eq!(count_operations(&expr), n);
    }

    #[test]
    fn digits_alone_count_as_one(v in 0u64..u64::MAX) {
        prop_assert_eq!(count_operations(&v.to_string()), 1);
    }
}

// ---------------------------------------------------------------------------
// Cache: keys are a function of their inputs
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn store_then_lookup_round_trips(a in any::<i64>(), b in any::<i64>(), r in any::<i64>()) {
        let cache = ResultCache::new();
        let key = CacheKey::new(Operation::Add, Operand::Int(a), Operand::Int(b));
        cache.store(key.clone(), Value::Num(Operand::Int(r)));
        prop_assert_eq!(cache.lookup(&key), Some(Value::Num(Operand::Int(r))));
    }

    #[test]
    fn distinct_operands_give_distinct_keys(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        let ka = CacheKey::new(Operation::Mul, Operand::Int(a), Operand::Int(a));
        let kb = CacheKey::new(Operation::Mul, Operand::Int(b), Operand::Int(b));
        prop_assert_ne!(ka, kb);
    }

    #[test]
    fn operations_give_distinct_keys(a in any::<i64>(), b in any::<i64>()) {
        let add = CacheKey::new(Operation::Add, Operand::Int(a), Operand::Int(b));
        let sub = CacheKey::new(Operation::Sub, Operand::Int(a), Operand::Int(b));
        prop_assert_ne!(add, sub);
    }
}

// ---------------------------------------------------------------------------
// Cost formatter: always a dollar sign, always at least two decimals
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn formatted_cost_shape(cost in 0.0f64..1000.0) {
        let formatted = format_cost(cost);
        prop_assert!(formatted.starts_with('$'));
        let decimals = formatted.split_once('.').map(|(_, d)| d.len()).unwrap_or(0);
        prop_assert!(decimals >= 2, "got '{formatted}'");
    }
}
