use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use echidna::Reverse64;
use num_complex::Complex64;
use num_dual::{Dual64, DualNum};
use num_traits::{Float, NumCast};

/// A number a residual function can be evaluated with.
///
/// Implemented for:
///
/// - `f64` — plain evaluation and central differences
/// - [`Dual64`] — forward-mode automatic differentiation
/// - [`Reverse64`] — reverse-mode automatic differentiation
/// - [`Complex64`] — complex-step differentiation
///
/// The elementary functions are the ones with a well-defined derivative for
/// every backing type. Residuals that need constants lift them with
/// [`Scalar::from_f64`].
pub trait Scalar:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a constant into this scalar type.
    fn from_f64(value: f64) -> Self;

    #[must_use]
    fn sqrt(self) -> Self;

    #[must_use]
    fn exp(self) -> Self;

    /// Natural logarithm.
    #[must_use]
    fn ln(self) -> Self;

    #[must_use]
    fn sin(self) -> Self;

    #[must_use]
    fn cos(self) -> Self;

    #[must_use]
    fn tanh(self) -> Self;

    #[must_use]
    fn powi(self, n: i32) -> Self;

    #[must_use]
    fn powf(self, n: f64) -> Self;
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn tanh(self) -> Self {
        f64::tanh(self)
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }
}

impl Scalar for Dual64 {
    fn from_f64(value: f64) -> Self {
        Dual64::new(value, 0.0)
    }

    fn sqrt(self) -> Self {
        DualNum::sqrt(&self)
    }

    fn exp(self) -> Self {
        DualNum::exp(&self)
    }

    fn ln(self) -> Self {
        DualNum::ln(&self)
    }

    fn sin(self) -> Self {
        DualNum::sin(&self)
    }

    fn cos(self) -> Self {
        DualNum::cos(&self)
    }

    fn tanh(self) -> Self {
        DualNum::tanh(&self)
    }

    fn powi(self, n: i32) -> Self {
        DualNum::powi(&self, n)
    }

    fn powf(self, n: f64) -> Self {
        DualNum::powf(&self, n)
    }
}

impl Scalar for Complex64 {
    fn from_f64(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }

    fn exp(self) -> Self {
        Complex64::exp(self)
    }

    fn ln(self) -> Self {
        Complex64::ln(self)
    }

    fn sin(self) -> Self {
        Complex64::sin(self)
    }

    fn cos(self) -> Self {
        Complex64::cos(self)
    }

    fn tanh(self) -> Self {
        Complex64::tanh(self)
    }

    fn powi(self, n: i32) -> Self {
        Complex64::powi(&self, n)
    }

    fn powf(self, n: f64) -> Self {
        Complex64::powf(self, n)
    }
}

impl Scalar for Reverse64 {
    fn from_f64(value: f64) -> Self {
        // Lifting an f64 into the f64-backed tape type cannot fail.
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    fn sqrt(self) -> Self {
        Float::sqrt(self)
    }

    fn exp(self) -> Self {
        Float::exp(self)
    }

    fn ln(self) -> Self {
        Float::ln(self)
    }

    fn sin(self) -> Self {
        Float::sin(self)
    }

    fn cos(self) -> Self {
        Float::cos(self)
    }

    fn tanh(self) -> Self {
        Float::tanh(self)
    }

    fn powi(self, n: i32) -> Self {
        Float::powi(self, n)
    }

    fn powf(self, n: f64) -> Self {
        Float::powf(self, <Self as Scalar>::from_f64(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// g(x) = x³ + sin(x)·exp(x) − 2/x, written once for every scalar.
    fn cubic_mix<T: Scalar>(x: T) -> T {
        x.powi(3) + x.sin() * x.exp() - T::from_f64(2.0) / x
    }

    fn cubic_mix_derivative(x: f64) -> f64 {
        3.0 * x * x + (x.cos() + x.sin()) * x.exp() + 2.0 / (x * x)
    }

    #[test]
    fn plain_evaluation_matches_closed_form() {
        let x = 0.7_f64;
        let expected = x.powi(3) + x.sin() * x.exp() - 2.0 / x;
        assert_relative_eq!(cubic_mix(x), expected);
    }

    #[test]
    fn dual_carries_exact_derivative() {
        let x = 0.7;
        let y = cubic_mix(Dual64::new(x, 1.0));

        assert_relative_eq!(y.re, cubic_mix(x), epsilon = 1e-14);
        assert_relative_eq!(y.eps, cubic_mix_derivative(x), epsilon = 1e-12);
    }

    #[test]
    fn complex_step_recovers_derivative() {
        let x = 0.7;
        let h = 1e-20;
        let y = cubic_mix(Complex64::new(x, h));

        assert_relative_eq!(y.re, cubic_mix(x), epsilon = 1e-14);
        assert_relative_eq!(y.im / h, cubic_mix_derivative(x), epsilon = 1e-12);
    }

    #[test]
    fn reverse_sweep_recovers_derivative() {
        let x = 0.7;
        let gradient = echidna::grad(|v: &[Reverse64]| cubic_mix(v[0]), &[x]);

        assert_eq!(gradient.len(), 1);
        assert_relative_eq!(gradient[0], cubic_mix_derivative(x), epsilon = 1e-12);
    }

    #[test]
    fn reverse_powf_lifts_the_exponent_as_a_constant() {
        let x = 2.5;
        let gradient = echidna::grad(|v: &[Reverse64]| Scalar::powf(v[0], 1.5), &[x]);

        assert_relative_eq!(gradient[0], 1.5 * x.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn constants_have_no_tangent() {
        let c = <Dual64 as Scalar>::from_f64(3.5);
        assert_relative_eq!(c.re, 3.5);
        assert_relative_eq!(c.eps, 0.0);

        let z = <Complex64 as Scalar>::from_f64(3.5);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn fractional_powers_and_logs() {
        let x = 2.5;
        let d = Dual64::new(x, 1.0);
        let y = Scalar::powf(d, 1.5) + Scalar::tanh(Scalar::ln(d));

        let inner = x.ln();
        let sech2 = 1.0 - inner.tanh().powi(2);
        assert_relative_eq!(y.eps, 1.5 * x.sqrt() + sech2 / x, epsilon = 1e-12);
    }
}
