use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::representation::Representation;

/// How derivatives of the residual are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub enum DifferentiationMode {
    /// Forward-mode automatic differentiation.
    ///
    /// Efficient when the number of outputs is at least the number of
    /// inputs, which always holds for the scalar parameter.
    #[default]
    Forward,

    /// Reverse-mode automatic differentiation.
    ///
    /// Efficient when inputs outnumber outputs.
    Reverse,

    /// Central finite differences, `O(h²)` accurate.
    Numerical,

    /// Complex-step differentiation.
    ///
    /// Free of subtractive cancellation, but the residual must be analytic.
    Complex,
}

impl DifferentiationMode {
    /// All recognized modes.
    pub const ALL: [Self; 4] = [Self::Forward, Self::Reverse, Self::Numerical, Self::Complex];

    /// The name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Reverse => "Reverse",
            Self::Numerical => "Numerical",
            Self::Complex => "Complex",
        }
    }

    /// The working representation residuals are evaluated in.
    #[must_use]
    pub fn representation(self) -> Representation {
        match self {
            Self::Forward | Self::Reverse => Representation::Traced,
            Self::Numerical | Self::Complex => Representation::Plain,
        }
    }
}

impl fmt::Display for DifferentiationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A differentiation mode name that is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown differentiation mode `{name}` (expected Forward, Reverse, Numerical or Complex)")]
pub struct UnknownDifferentiationModeError {
    pub name: String,
}

impl FromStr for DifferentiationMode {
    type Err = UnknownDifferentiationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownDifferentiationModeError { name: s.to_owned() })
    }
}

impl TryFrom<String> for DifferentiationMode {
    type Error = UnknownDifferentiationModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which continuation driver a run is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub enum ContinuationMethod {
    /// Pseudo-arclength continuation with an Euler predictor and Newton corrector.
    #[default]
    EulerNewton,

    /// Natural-parameter continuation.
    Natural,
}

impl ContinuationMethod {
    /// The name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EulerNewton => "Euler-Newton",
            Self::Natural => "Natural",
        }
    }
}

impl fmt::Display for ContinuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A continuation method name that is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown continuation method `{name}` (expected Euler-Newton or Natural)")]
pub struct UnknownContinuationMethodError {
    pub name: String,
}

impl FromStr for ContinuationMethod {
    type Err = UnknownContinuationMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::EulerNewton, Self::Natural]
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| UnknownContinuationMethodError { name: s.to_owned() })
    }
}

impl TryFrom<String> for ContinuationMethod {
    type Error = UnknownContinuationMethodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
