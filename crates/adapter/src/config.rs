pub use fcontin_solvers::ConfigError;

use crate::{ContinuationMethod, DifferentiationMode, Error};

/// Configuration for a continuation run.
///
/// `differentiation_mode` is consumed by the adapter. Everything else is
/// forwarded untouched to the continuation driver selected by
/// `continuation_method`.
///
/// With the `serde` feature enabled, missing fields take their defaults and
/// the enums are read by their configuration names:
///
/// ```toml
/// differentiation_mode = "Complex"
/// continuation_method = "Natural"
/// max_steps = 50
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Config {
    pub differentiation_mode: DifferentiationMode,
    pub continuation_method: ContinuationMethod,
    /// Maximum number of accepted continuation steps.
    pub max_steps: usize,
    /// Corrector convergence threshold on the residual norm.
    pub newton_tolerance: f64,
    /// Initial step length.
    pub step_size: f64,
    /// Smallest step length before the driver gives up.
    pub min_step: f64,
    /// Corrector iterations allowed per step.
    pub max_newton_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        let driver = fcontin_solvers::Config::default();
        Self {
            differentiation_mode: DifferentiationMode::default(),
            continuation_method: ContinuationMethod::default(),
            max_steps: driver.max_steps,
            newton_tolerance: driver.newton_tol,
            step_size: driver.step_size,
            min_step: driver.min_step,
            max_newton_iters: driver.max_newton_iters,
        }
    }
}

impl Config {
    /// Default settings with the mode and method given by their
    /// configuration names, e.g. `"Complex"` and `"Euler-Newton"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDifferentiationMode`] or
    /// [`Error::UnknownContinuationMethod`] for an unrecognized name.
    pub fn from_names(
        differentiation_mode: &str,
        continuation_method: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            differentiation_mode: differentiation_mode.parse()?,
            continuation_method: continuation_method.parse()?,
            ..Self::default()
        })
    }

    /// Validates the settings forwarded to the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if a step bound or tolerance is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.driver_config().validate()
    }

    /// The subset of this config the continuation driver consumes.
    #[must_use]
    pub fn driver_config(&self) -> fcontin_solvers::Config {
        fcontin_solvers::Config {
            max_steps: self.max_steps,
            newton_tol: self.newton_tolerance,
            max_newton_iters: self.max_newton_iters,
            step_size: self.step_size,
            min_step: self.min_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.differentiation_mode, DifferentiationMode::Forward);
        assert_eq!(config.continuation_method, ContinuationMethod::EulerNewton);
        assert_eq!(config.max_steps, 10);
        assert!((config.newton_tolerance - 1e-10).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_names_reads_configuration_names() {
        let config = Config::from_names("Complex", "Natural").expect("known names");

        assert_eq!(config.differentiation_mode, DifferentiationMode::Complex);
        assert_eq!(config.continuation_method, ContinuationMethod::Natural);
        assert_eq!(config.max_steps, Config::default().max_steps);
    }

    #[test]
    fn from_names_rejects_unknown_names() {
        assert!(matches!(
            Config::from_names("Symbolic", "Natural"),
            Err(Error::UnknownDifferentiationMode(err)) if err.name == "Symbolic"
        ));
        assert!(matches!(
            Config::from_names("Forward", "Arclength"),
            Err(Error::UnknownContinuationMethod(err)) if err.name == "Arclength"
        ));
    }

    #[test]
    fn rejects_zero_steps() {
        let config = Config {
            max_steps: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        for newton_tolerance in [0.0, -1e-8, f64::NAN, f64::INFINITY] {
            let config = Config {
                newton_tolerance,
                ..Config::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::NewtonTol));
        }
    }

    #[test]
    fn forwards_driver_settings() {
        let config = Config {
            max_steps: 7,
            newton_tolerance: 1e-6,
            step_size: 0.25,
            min_step: 1e-4,
            max_newton_iters: 3,
            ..Config::default()
        };

        let driver = config.driver_config();
        assert_eq!(driver.max_steps, 7);
        assert_eq!(driver.max_newton_iters, 3);
        assert!((driver.newton_tol - 1e-6).abs() < f64::EPSILON);
        assert!((driver.step_size - 0.25).abs() < f64::EPSILON);
        assert!((driver.min_step - 1e-4).abs() < f64::EPSILON);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_toml() {
        let config: Config = toml::from_str(
            r#"
            differentiation_mode = "Complex"
            continuation_method = "Natural"
            max_steps = 50
            "#,
        )
        .expect("valid config");

        assert_eq!(config.differentiation_mode, DifferentiationMode::Complex);
        assert_eq!(config.continuation_method, ContinuationMethod::Natural);
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.max_newton_iters, Config::default().max_newton_iters);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_mode_fails_deserialization() {
        let result: Result<Config, _> = toml::from_str(r#"differentiation_mode = "Symbolic""#);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown differentiation mode"));
    }
}
