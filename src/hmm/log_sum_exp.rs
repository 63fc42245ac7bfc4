//! Numerically stable log-space addition.
//!
//! Adding two probabilities that are stored as natural logarithms requires
//! `ln(exp(a) + exp(b))`, which overflows or underflows if evaluated
//! naively. The pairwise operator in this module rewrites it as
//! `max(a, b) + ln(1 + exp(-|a - b|))`, so the argument of `exp` is never
//! positive and the result is exact up to rounding.

use num_traits::Float;

/// Computes `ln(exp(a) + exp(b))` without overflow or underflow.
///
/// Negative infinity encodes a probability of exactly zero, so it acts as
/// the identity: `log_sum_exp(NEG_INFINITY, x) == x`. These shortcuts are
/// checked first because the general formula would produce `NaN` from
/// `-inf - (-inf)`. A `NaN` operand falls through the shortcuts (its
/// comparisons are false) and propagates through the arithmetic, which is
/// the intended signal of corrupt upstream data.
///
/// The operator is commutative and associative, so folds over it may use
/// any order.
///
/// # Examples
///
/// ```
/// use hmm_forward::hmm::log_sum_exp::log_sum_exp;
///
/// // ln(exp(0) + exp(0)) = ln(2)
/// let sum = log_sum_exp(0.0, 0.0);
/// assert!((sum - 2.0_f64.ln()).abs() < 1e-12);
///
/// // Adding a zero probability leaves the other operand unchanged
/// assert_eq!(log_sum_exp(f64::NEG_INFINITY, -3.5), -3.5);
/// ```
pub fn log_sum_exp<T: Float>(a: T, b: T) -> T {
    if a == T::neg_infinity() {
        return b;
    }
    if b == T::neg_infinity() {
        return a;
    }
    let max = a.max(b);
    max + (-(a - b).abs()).exp().ln_1p()
}

/// Folds [`log_sum_exp`] over a slice, left to right, starting from the
/// identity `-inf`.
///
/// Returns negative infinity for an empty slice, the log of a sum of zero
/// probabilities.
pub fn log_sum_exp_fold<T: Float>(values: &[T]) -> T {
    values
        .iter()
        .fold(T::neg_infinity(), |acc, &x| log_sum_exp(acc, x))
}
