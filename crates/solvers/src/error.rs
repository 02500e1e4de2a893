use crate::ConfigError;

/// Errors that can occur during a continuation run.
///
/// Problem errors are passed through unchanged so callers can match on them.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("problem error: {0}")]
    Problem(#[source] E),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("corrector did not converge at the initial point (parameter {parameter})")]
    InitialPointNotConverged { parameter: f64 },

    #[error("step length {step} fell below the minimum at parameter {parameter}")]
    StepTooSmall { parameter: f64, step: f64 },
}
