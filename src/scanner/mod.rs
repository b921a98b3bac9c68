//! Collection scanning subsystem
//!
//! Two scheduling strategies over the same matcher, selected per
//! collection instance at construction:
//!
//! - **Sequential**: strictly ordered single-threaded scan with
//!   deterministic early exit once the result limit is reached.
//! - **Parallel**: a rayon worker pool evaluates every record and
//!   produces an index-aligned boolean vector; the caller filters and
//!   truncates afterwards.
//!
//! Limit semantics deliberately diverge between the modes: the
//! sequential scan stops evaluating as soon as the limit is reached,
//! while the parallel path always evaluates the full collection and
//! truncates only the filtered output. Callers relying on either
//! behavior must not be surprised by a silent change.

mod parallel;
mod sequential;

pub use parallel::evaluate_parallel;
pub use sequential::scan;

/// Scheduling strategy for query execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single-threaded ordered scan (the default)
    #[default]
    Sequential,
    /// Worker-pool evaluation; `workers: None` uses the platform default
    Parallel { workers: Option<usize> },
}

impl ExecutionMode {
    /// Parallel mode with the platform-default pool size
    pub fn parallel() -> Self {
        Self::Parallel { workers: None }
    }

    /// Parallel mode with a fixed pool size
    pub fn parallel_with_workers(workers: usize) -> Self {
        Self::Parallel {
            workers: Some(workers),
        }
    }

    /// Mode name for log events
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel { .. } => "parallel",
        }
    }
}
