//! Log-space forward algorithm for discrete hidden Markov models.
//!
//! Mirrors the recursion in [`forward`](crate::hmm::forward) but stores
//! every quantity as a natural-log probability, replacing multiplication
//! with addition and summation with a [`log_sum_exp`] fold. No value is
//! ever held in linear scale, so the table stays finite on sequences that
//! would drive the direct variant to zero. The price is a transcendental
//! call per combine, roughly an order of magnitude more arithmetic per
//! cell.
//!
//! Zero-probability inputs become `-inf` under `ln` and flow through the
//! recursion unchanged; they are valid values here, not errors.

use num_traits::Float;
use rayon::prelude::*;

use super::log_sum_exp::{log_sum_exp, log_sum_exp_fold};

/// Shared shape preconditions for the forward recursions.
///
/// The numeric contract (nonnegative entries, stochastic rows) is the
/// caller's responsibility and is not re-checked here.
fn assert_dimensions<T: Float>(
    initial_probabilities: &[T],
    transition_probabilities: &[Vec<T>],
    emission_likelihoods: &[Vec<T>],
) {
    let num_states = initial_probabilities.len();
    assert!(num_states > 0, "Model must have at least one hidden state");
    assert_eq!(
        transition_probabilities.len(),
        num_states,
        "Transition matrix must have one row per hidden state"
    );
    for (j, row) in transition_probabilities.iter().enumerate() {
        assert_eq!(
            row.len(),
            num_states,
            "Transition matrix row {} must have one entry per hidden state",
            j
        );
    }
    for (t, row) in emission_likelihoods.iter().enumerate() {
        assert_eq!(
            row.len(),
            num_states,
            "Emission row {} must have one entry per hidden state",
            t
        );
    }
}

/// Takes the elementwise natural log of a probability row. `ln(0)` is
/// `-inf` by convention, never an error.
fn log_transform<T: Float>(row: &[T]) -> Vec<T> {
    row.iter().map(|&p| p.ln()).collect()
}

/// Runs the forward algorithm in log space.
///
/// Takes the same linear-probability inputs as
/// [`forward`](crate::hmm::forward::forward) and log-transforms them once
/// up front, keeping `ln` out of the O(T * S^2) recursion. The returned
/// table holds natural-log probabilities: entry `[t][k]` is the log of
/// the joint probability of the observations up to time `t` and of being
/// in state `k` at time `t`, possibly `-inf` where that probability is
/// exactly zero.
///
/// The output is not directly comparable to the direct variant's without
/// an `exp`/`ln` conversion.
///
/// # Panics
///
/// Panics if the inputs disagree on the number of hidden states.
///
/// # Examples
///
/// ```
/// use hmm_forward::hmm::forward_log::forward_log;
///
/// let initial: Vec<f64> = vec![0.6, 0.4];
/// let transition = vec![vec![0.7, 0.3], vec![0.4, 0.6]];
/// let emission = vec![vec![0.5, 0.1], vec![0.1, 0.5]];
///
/// let log_alpha = forward_log(&initial, &transition, &emission);
///
/// // exp recovers the direct-space value: 0.6 * 0.5 = 0.30
/// assert!((log_alpha[0][0].exp() - 0.30).abs() < 1e-12);
/// ```
#[must_use]
pub fn forward_log<T: Float>(
    initial_probabilities: &[T],
    transition_probabilities: &[Vec<T>],
    emission_likelihoods: &[Vec<T>],
) -> Vec<Vec<T>> {
    assert_dimensions(
        initial_probabilities,
        transition_probabilities,
        emission_likelihoods,
    );

    let num_steps = emission_likelihoods.len();
    let num_states = initial_probabilities.len();
    if num_steps == 0 {
        return Vec::new();
    }

    // One-time O(S^2 + T*S) log transform, amortized over the recursion
    let log_initial = log_transform(initial_probabilities);
    let log_transition: Vec<Vec<T>> = transition_probabilities
        .iter()
        .map(|row| log_transform(row))
        .collect();
    let log_emission: Vec<Vec<T>> = emission_likelihoods
        .iter()
        .map(|row| log_transform(row))
        .collect();

    let mut log_alpha = vec![vec![T::neg_infinity(); num_states]; num_steps];

    // Initialization (t = 0): log(a * b) = log(a) + log(b)
    for k in 0..num_states {
        log_alpha[0][k] = log_initial[k] + log_emission[0][k];
    }

    // Recursion: the accumulator starts at -inf, the log of probability
    // zero, and grows by pairwise log-sum-exp
    for t in 1..num_steps {
        for k in 0..num_states {
            let mut acc = T::neg_infinity();
            for j in 0..num_states {
                acc = log_sum_exp(acc, log_alpha[t - 1][j] + log_transition[j][k]);
            }
            log_alpha[t][k] = acc + log_emission[t][k];
        }
    }

    log_alpha
}

/// Runs the log-space forward algorithm with each row computed in
/// parallel.
///
/// Timesteps stay strictly ordered; within a timestep the target states
/// are independent given the previous row and are distributed over the
/// rayon thread pool, as in
/// [`forward_parallel`](crate::hmm::forward::forward_parallel). The
/// log-sum-exp fold per target state keeps the same left-to-right order
/// as [`forward_log`], so the two produce identical tables. The log
/// transform of the inputs is not the hot loop and stays sequential.
///
/// # Panics
///
/// Panics if the inputs disagree on the number of hidden states.
#[must_use]
pub fn forward_log_parallel<T: Float + Send + Sync>(
    initial_probabilities: &[T],
    transition_probabilities: &[Vec<T>],
    emission_likelihoods: &[Vec<T>],
) -> Vec<Vec<T>> {
    assert_dimensions(
        initial_probabilities,
        transition_probabilities,
        emission_likelihoods,
    );

    let num_steps = emission_likelihoods.len();
    let num_states = initial_probabilities.len();
    if num_steps == 0 {
        return Vec::new();
    }

    let log_initial = log_transform(initial_probabilities);
    let log_transition: Vec<Vec<T>> = transition_probabilities
        .iter()
        .map(|row| log_transform(row))
        .collect();
    let log_emission: Vec<Vec<T>> = emission_likelihoods
        .iter()
        .map(|row| log_transform(row))
        .collect();

    let mut log_alpha: Vec<Vec<T>> = Vec::with_capacity(num_steps);

    let first: Vec<T> = (0..num_states)
        .map(|k| log_initial[k] + log_emission[0][k])
        .collect();
    log_alpha.push(first);

    for t in 1..num_steps {
        let previous = &log_alpha[t - 1];
        let row: Vec<T> = (0..num_states)
            .into_par_iter()
            .map(|k| {
                let mut acc = T::neg_infinity();
                for j in 0..num_states {
                    acc = log_sum_exp(acc, previous[j] + log_transition[j][k]);
                }
                acc + log_emission[t][k]
            })
            .collect();
        log_alpha.push(row);
    }

    log_alpha
}

/// Log-sum-exps the final row of a log-space forward table, yielding the
/// natural-log probability of the whole observation sequence.
///
/// Returns negative infinity for an empty table.
pub fn sequence_log_probability<T: Float>(log_alpha: &[Vec<T>]) -> T {
    match log_alpha.last() {
        Some(row) => log_sum_exp_fold(row),
        None => T::neg_infinity(),
    }
}
