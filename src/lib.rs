pub mod hmm;

pub use hmm::{
    forward, forward_log, forward_log_parallel, forward_parallel, log_sum_exp, log_sum_exp_fold,
    sequence_log_probability, sequence_probability,
};
