//! Numerical continuation using just the residual function.
//!
//! A continuation driver traces solutions of `F(u, λ) = 0` as `λ` varies and
//! needs Jacobians to do so. [`ProblemAdapter`] derives them from a
//! user-supplied [`Residual`](fcontin_core::Residual) with one of four
//! strategies:
//!
//! - [`DifferentiationMode::Forward`] — forward-mode automatic differentiation
//! - [`DifferentiationMode::Reverse`] — reverse-mode automatic differentiation
//! - [`DifferentiationMode::Numerical`] — central finite differences
//! - [`DifferentiationMode::Complex`] — complex-step differentiation
//!
//! Derivatives are cached per parameter value and exposed through the
//! [`ContinuationProblem`](fcontin_core::ContinuationProblem) contract.
//! [`Continuation`] bundles an adapter with a [`Config`] and forwards the run
//! to a driver from `fcontin-solvers`.

mod adapter;
mod cache;
mod config;
mod continuation;
mod differentiate;
mod error;
mod mode;
mod representation;
mod solve;

pub use adapter::ProblemAdapter;
pub use config::{Config, ConfigError};
pub use continuation::Continuation;
pub use differentiate::{CentralDifference, ComplexStep, ForwardMode, ReverseMode, Strategy};
pub use error::{DifferentiationError, Error, UserFunctionError};
pub use mode::{
    ContinuationMethod, DifferentiationMode, UnknownContinuationMethodError,
    UnknownDifferentiationModeError,
};
pub use representation::Representation;

pub use fcontin_solvers::{Action, Event, Point, Solution, Status};
