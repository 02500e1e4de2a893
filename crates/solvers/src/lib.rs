//! Continuation drivers for FContin.
//!
//! Both drivers trace a solution branch of `F(u, λ) = 0` through the
//! [`ContinuationProblem`](fcontin_core::ContinuationProblem) contract:
//!
//! - [`natural`] steps the parameter directly and corrects the state
//! - [`euler_newton`] steps along the branch tangent (pseudo-arclength) and
//!   corrects state and parameter together, so it follows a branch around
//!   folds
//!
//! Each driver reports accepted points to an [`Observer`](fcontin_core::Observer)
//! as [`Event`]s and returns the traced branch as a [`Solution`].

mod action;
mod config;
mod corrector;
mod error;
mod event;
mod point;
mod solution;

pub mod euler_newton;
pub mod natural;

#[cfg(test)]
mod test_problems;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use point::Point;
pub use solution::{Solution, Status};
