//! # Arithmetic Module
//!
//! Three interchangeable ways of computing `1 + 2 + ... + n`.
//!
//! ## The Three Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant        Method                  Time    Space   Notes           │
//! │  ─────────────  ──────────────────────  ──────  ──────  ─────────────── │
//! │  iterative      loop accumulation       O(n)    O(1)    general purpose │
//! │  closed_form    n(n+1)/2                O(1)    O(1)    fastest         │
//! │  recursive      n + sum(n-1)            O(n)    O(n)    educational     │
//! │                                                                         │
//! │  All three agree for every valid n. All three reject n < 0.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Non-Integers Come From
//! The sum functions take an `i64`, so a fractional `n` cannot reach them.
//! Text (`parse_n`) and floats (`n_from_f64`) are checked at the boundary
//! and fail with the same invalid-argument error.

use crate::error::{CoreError, CoreResult};
use crate::MAX_RECURSION_N;

/// Largest float that is still an exact integer (2^53 - 1).
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_991.0;

const NEGATIVE_N: &str = "n must be a non-negative integer";

// =============================================================================
// Validation
// =============================================================================

fn check_n(n: i64) -> CoreResult<()> {
    if n < 0 {
        return Err(CoreError::invalid_argument(NEGATIVE_N));
    }
    Ok(())
}

/// Parses `n` from user-supplied text.
///
/// ## Example
/// ```rust
/// use swapdesk_core::arithmetic::parse_n;
///
/// assert_eq!(parse_n(" 888 ").unwrap(), 888);
/// assert!(parse_n("2.5").is_err());
/// assert!(parse_n("-1").is_err());
/// assert!(parse_n("abc").is_err());
/// ```
pub fn parse_n(input: &str) -> CoreResult<i64> {
    let input = input.trim();

    if let Ok(n) = input.parse::<i64>() {
        check_n(n)?;
        return Ok(n);
    }

    // "10.0" is still a whole number
    match input.parse::<f64>() {
        Ok(value) => n_from_f64(value),
        Err(_) => Err(CoreError::invalid_argument(format!(
            "'{}' is not a number",
            input
        ))),
    }
}

/// Converts a float to `n`, rejecting fractions, negatives and non-finite
/// values.
pub fn n_from_f64(value: f64) -> CoreResult<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
        return Err(CoreError::invalid_argument(NEGATIVE_N));
    }

    if value > MAX_EXACT_FLOAT_INT {
        return Err(CoreError::invalid_argument(
            "n is too large to be represented exactly",
        ));
    }

    Ok(value as i64)
}

// =============================================================================
// Sum Variants
// =============================================================================

/// Sums `1..=n` with a loop.
///
/// ## Example
/// ```rust
/// use swapdesk_core::arithmetic::sum_to_n_iterative;
///
/// assert_eq!(sum_to_n_iterative(5).unwrap(), 15);
/// assert_eq!(sum_to_n_iterative(0).unwrap(), 0);
/// ```
pub fn sum_to_n_iterative(n: i64) -> CoreResult<i64> {
    check_n(n)?;

    let mut sum: i64 = 0;
    for i in 1..=n {
        sum = sum
            .checked_add(i)
            .ok_or_else(|| CoreError::Overflow(format!("sum to {} exceeds i64", n)))?;
    }
    Ok(sum)
}

/// Sums `1..=n` with the closed form `n(n+1)/2`.
///
/// Uses i128 for the intermediate product so the multiplication itself never
/// overflows; only a result outside i64 is reported.
pub fn sum_to_n_closed_form(n: i64) -> CoreResult<i64> {
    check_n(n)?;

    let n = n as i128;
    let sum = n * (n + 1) / 2;

    i64::try_from(sum).map_err(|_| CoreError::Overflow(format!("sum to {} exceeds i64", n)))
}

/// Sums `1..=n` recursively.
///
/// Rejects `n > MAX_RECURSION_N` rather than risking the stack.
pub fn sum_to_n_recursive(n: i64) -> CoreResult<i64> {
    check_n(n)?;

    if n > MAX_RECURSION_N {
        return Err(CoreError::invalid_argument(format!(
            "recursive sum supports n up to {}",
            MAX_RECURSION_N
        )));
    }

    fn go(n: i64) -> i64 {
        if n == 0 {
            0
        } else {
            n + go(n - 1)
        }
    }

    Ok(go(n))
}

// =============================================================================
// Implementation Catalogue
// =============================================================================

/// Describes one summation variant for display.
#[derive(Debug, Clone, Copy)]
pub struct SumImplementation {
    /// Function name as shown to the user.
    pub name: &'static str,

    /// One-line description of the approach.
    pub description: &'static str,

    /// Big-O time complexity.
    pub time_complexity: &'static str,

    /// Big-O space complexity.
    pub space_complexity: &'static str,

    /// The function itself.
    pub function: fn(i64) -> CoreResult<i64>,
}

/// The three variants, in display order.
pub const SUM_IMPLEMENTATIONS: [SumImplementation; 3] = [
    SumImplementation {
        name: "sum_to_n_iterative",
        description: "Iterative - safest general-purpose solution",
        time_complexity: "O(n)",
        space_complexity: "O(1)",
        function: sum_to_n_iterative,
    },
    SumImplementation {
        name: "sum_to_n_closed_form",
        description: "Formula - fastest, bounded only by the integer range",
        time_complexity: "O(1)",
        space_complexity: "O(1)",
        function: sum_to_n_closed_form,
    },
    SumImplementation {
        name: "sum_to_n_recursive",
        description: "Recursive - educational only",
        time_complexity: "O(n)",
        space_complexity: "O(n)",
        function: sum_to_n_recursive,
    },
];

/// Runs every variant for `n`.
///
/// Fails with the first variant's error.
pub fn sum_all(n: i64) -> CoreResult<Vec<(SumImplementation, i64)>> {
    SUM_IMPLEMENTATIONS
        .iter()
        .map(|imp| (imp.function)(n).map(|sum| (*imp, sum)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_agree_up_to_ten_thousand() {
        for n in 0..=10_000i64 {
            let expected = n * (n + 1) / 2;
            assert_eq!(sum_to_n_iterative(n).unwrap(), expected, "iterative n={}", n);
            assert_eq!(sum_to_n_closed_form(n).unwrap(), expected, "closed n={}", n);
            assert_eq!(sum_to_n_recursive(n).unwrap(), expected, "recursive n={}", n);
        }
    }

    #[test]
    fn test_negative_rejected() {
        for imp in SUM_IMPLEMENTATIONS.iter() {
            let err = (imp.function)(-1).unwrap_err();
            assert!(matches!(err, CoreError::InvalidArgument(_)), "{}", imp.name);
        }
    }

    #[test]
    fn test_non_integer_rejected() {
        assert!(matches!(parse_n("2.5"), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(n_from_f64(0.1), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(n_from_f64(f64::NAN), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(n_from_f64(-3.0), Err(CoreError::InvalidArgument(_))));
        assert!(parse_n("").is_err());
    }

    #[test]
    fn test_whole_floats_accepted() {
        assert_eq!(parse_n("10.0").unwrap(), 10);
        assert_eq!(n_from_f64(888.0).unwrap(), 888);
    }

    #[test]
    fn test_recursive_depth_limit() {
        assert!(sum_to_n_recursive(MAX_RECURSION_N).is_ok());
        assert!(matches!(
            sum_to_n_recursive(MAX_RECURSION_N + 1),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_closed_form_overflow() {
        assert!(matches!(
            sum_to_n_closed_form(i64::MAX),
            Err(CoreError::Overflow(_))
        ));
        // Largest n whose sum still fits in i64
        assert!(sum_to_n_closed_form(4_294_967_295).is_ok());
    }

    #[test]
    fn test_sum_all() {
        let results = sum_all(888).unwrap();
        assert_eq!(results.len(), 3);
        for (imp, sum) in results {
            assert_eq!(sum, 394_716, "{}", imp.name);
        }
    }
}
