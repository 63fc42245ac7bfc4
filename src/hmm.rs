pub mod forward;
pub mod forward_log;
pub mod log_sum_exp;

// Re-export the forward-recursion kernels with descriptive names
pub use forward::{forward, forward_parallel, sequence_probability};
pub use forward_log::{forward_log, forward_log_parallel, sequence_log_probability};
pub use log_sum_exp::{log_sum_exp, log_sum_exp_fold};
