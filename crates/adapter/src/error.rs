use std::error::Error as StdError;

use thiserror::Error;

use crate::config::ConfigError;
use crate::mode::{UnknownContinuationMethodError, UnknownDifferentiationModeError};

/// Errors produced by the problem adapter.
///
/// Every failure propagates to the caller with its kind preserved; the
/// adapter never retries or regularizes.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UnknownDifferentiationMode(#[from] UnknownDifferentiationModeError),

    #[error(transparent)]
    UnknownContinuationMethod(#[from] UnknownContinuationMethodError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("initial state must have at least one component")]
    EmptyState,

    #[error("state has {actual} components, expected {expected}")]
    StateLength { expected: usize, actual: usize },

    #[error("right-hand side has {actual} components, expected {expected}")]
    RhsLength { expected: usize, actual: usize },

    #[error(transparent)]
    UserFunction(#[from] UserFunctionError),

    #[error("Jacobian is singular")]
    SingularJacobian,

    #[error("differentiation backend failed: {0}")]
    DifferentiationBackend(#[from] DifferentiationError),

    #[error("continuation driver failed: {0}")]
    Driver(#[source] Box<dyn StdError + Send + Sync>),
}

/// The residual function failed or returned a malformed result.
#[derive(Debug, Error)]
pub enum UserFunctionError {
    #[error("residual function failed: {0}")]
    Failed(#[source] Box<dyn StdError + Send + Sync>),

    #[error("residual function returned {actual} components, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
}

impl UserFunctionError {
    pub(crate) fn failed<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Failed(Box::new(err))
    }
}

/// A failure inside the selected differentiation strategy.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DifferentiationError {
    #[error("non-finite input {value} at component {index}")]
    NonFiniteInput { index: usize, value: f64 },

    #[error("non-finite derivative of component {row} with respect to component {column}")]
    NonFiniteDerivative { row: usize, column: usize },
}
