//! Linear-space forward algorithm for discrete hidden Markov models.
//!
//! Computes the forward variable `alpha[t][k]`: the joint probability of
//! the observation prefix `0..=t` and of occupying hidden state `k` at
//! time `t`. Probabilities are multiplied and summed directly, which is
//! the fastest formulation but underflows to zero on long sequences or
//! low-probability paths. For those cases use the log-space variant in
//! [`forward_log`](crate::hmm::forward_log).

use num_traits::Float;
use rayon::prelude::*;

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

/// Runs the forward algorithm in direct probability space.
///
/// # Arguments
///
/// - `initial_probabilities`: prior probability of each hidden state at
///   time 0 (length `S`, summing to 1)
/// - `transition_probabilities`: `S x S` row-stochastic matrix;
///   entry `[j][k]` is the probability of moving from state `j` to `k`
/// - `emission_likelihoods`: one row per observed timestep; entry
///   `[t][k]` is the likelihood of the observation at time `t` given
///   state `k`
///
/// # Returns
///
/// A freshly allocated table with one row per timestep; entry `[t][k]`
/// is the joint probability of the observations up to time `t` and of
/// being in state `k` at time `t`. An empty emission table yields an
/// empty result.
///
/// No rescaling is applied between timesteps, so entries shrink
/// monotonically and collapse to `0.0` once they pass below the smallest
/// representable positive float. That is accepted behavior of this
/// variant, not an error.
///
/// # Panics
///
/// Panics if the inputs disagree on the number of hidden states.
///
/// # Examples
///
/// ```
/// use hmm_forward::hmm::forward::forward;
///
/// let initial: Vec<f64> = vec![0.6, 0.4];
/// let transition = vec![vec![0.7, 0.3], vec![0.4, 0.6]];
/// let emission = vec![vec![0.5, 0.1], vec![0.1, 0.5]];
///
/// let alpha = forward(&initial, &transition, &emission);
///
/// assert_eq!(alpha.len(), 2);
/// assert!((alpha[0][0] - 0.30).abs() < 1e-12);
/// assert!((alpha[0][1] - 0.04).abs() < 1e-12);
/// ```
#[must_use]
pub fn forward<T: Float>(
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

    let mut alpha = vec![vec![T::zero(); num_states]; num_steps];

    // Initialization (t = 0)
    for k in 0..num_states {
        alpha[0][k] = initial_probabilities[k] * emission_likelihoods[0][k];
    }

    // Recursion: weight every path into state k by its transition
    // probability, then by the likelihood of the current observation
    for t in 1..num_steps {
        for k in 0..num_states {
            let mut acc = T::zero();
            for j in 0..num_states {
                acc = acc + alpha[t - 1][j] * transition_probabilities[j][k];
            }
            alpha[t][k] = acc * emission_likelihoods[t][k];
        }
    }

    alpha
}

/// Runs the forward algorithm with each row computed in parallel.
///
/// The recurrence `alpha[t]` depends on all of `alpha[t - 1]`, so
/// timesteps stay strictly ordered; within a timestep each target state
/// is independent given the previous row and is distributed over the
/// rayon thread pool. The inner sum over source states keeps the same
/// sequential order as [`forward`], so the two produce identical tables.
///
/// Worth it only when the state count is large enough to amortize the
/// per-row scheduling overhead.
///
/// # Panics
///
/// Panics if the inputs disagree on the number of hidden states.
#[must_use]
pub fn forward_parallel<T: Float + Send + Sync>(
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

    let mut alpha: Vec<Vec<T>> = Vec::with_capacity(num_steps);

    let first: Vec<T> = (0..num_states)
        .map(|k| initial_probabilities[k] * emission_likelihoods[0][k])
        .collect();
    alpha.push(first);

    for t in 1..num_steps {
        let previous = &alpha[t - 1];
        let row: Vec<T> = (0..num_states)
            .into_par_iter()
            .map(|k| {
                let mut acc = T::zero();
                for j in 0..num_states {
                    acc = acc + previous[j] * transition_probabilities[j][k];
                }
                acc * emission_likelihoods[t][k]
            })
            .collect();
        alpha.push(row);
    }

    alpha
}

/// Sums the final row of a forward table, yielding the probability of the
/// whole observation sequence under the model.
///
/// Returns zero for an empty table.
pub fn sequence_probability<T: Float>(alpha: &[Vec<T>]) -> T {
    match alpha.last() {
        Some(row) => row.iter().fold(T::zero(), |acc, &p| acc + p),
        None => T::zero(),
    }
}
