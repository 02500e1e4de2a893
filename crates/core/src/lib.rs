//! Core traits and numeric types for FContin.
//!
//! This crate defines the shared abstractions that the problem adapter and
//! the continuation drivers build on:
//!
//! - [`Scalar`] — the numeric type a residual function is written against,
//!   implemented for `f64`, forward-mode dual numbers, `echidna` reverse-mode
//!   variables, and complex numbers
//! - [`Residual`] — a user function `F(u, λ)` generic over [`Scalar`]
//! - [`ContinuationProblem`] — the operation contract a continuation driver
//!   calls into
//! - [`Observer`] — receives driver events and optionally returns control actions

mod observer;
mod problem;
mod residual;
mod scalar;

pub use observer::Observer;
pub use problem::ContinuationProblem;
pub use residual::Residual;
pub use scalar::Scalar;
