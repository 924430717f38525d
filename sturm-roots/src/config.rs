//! This module contains the configuration options of the crate. Currently,
//! the only option is the default [`Tolerance`] used to decide whether a
//! coefficient counts as zero during polynomial division.
//!
//! The options can also be set via environment variables. Generally, the
//! environment variables take precedence over the options set in this module.

use std::cell::RefCell;

use serde::Deserialize;
use serde::Serialize;

use crate::error::PolynomialError;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Config {
    pub remainder_tolerance: Tolerance,
}

impl Config {
    fn new() -> Self {
        let remainder_tolerance = Tolerance::from_env_or(None);

        Self {
            remainder_tolerance,
        }
    }
}

/// An absolute threshold below which a coefficient is treated as zero.
///
/// The threshold is absolute, not relative. It is therefore sensitive to the
/// scale of the coefficients: for polynomials with very large coefficients,
/// the default can be too small to catch round-off residue, and for
/// polynomials with tiny coefficients it can swallow genuine terms. Callers
/// working with ill-scaled input should pick a tolerance that fits their
/// data.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    const ENV_VAR: &'static str = "STURM_ROOTS_REMAINDER_TOLERANCE";
    const DEFAULT: f64 = 1e-14;

    /// Only coefficients that are exactly zero are treated as zero.
    pub const EXACT: Self = Self(0.0);

    pub fn new(tolerance: f64) -> Result<Self, PolynomialError> {
        if tolerance.is_finite() && tolerance >= 0.0 {
            Ok(Self(tolerance))
        } else {
            Err(PolynomialError::InvalidTolerance(tolerance))
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether `x` is indistinguishable from zero under this tolerance. NaN is
    /// never considered negligible.
    pub fn is_negligible(self, x: f64) -> bool {
        x.abs() <= self.0
    }

    /// Respects the precedence of the environment variable if set and valid.
    /// Uses the built-in default if neither source provides a valid value.
    fn from_env_or(config_value: Option<Self>) -> Self {
        let env_value = std::env::var(Self::ENV_VAR).ok();
        Self::resolve(env_value.as_deref(), config_value)
    }

    fn resolve(env_value: Option<&str>, config_value: Option<Self>) -> Self {
        env_value
            .and_then(|s| s.trim().parse().ok())
            .and_then(|t| Self::new(t).ok())
            .or(config_value)
            .unwrap_or(Self(Self::DEFAULT))
    }
}

impl Default for Tolerance {
    /// The currently configured [remainder tolerance](remainder_tolerance).
    fn default() -> Self {
        remainder_tolerance()
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = PolynomialError;

    fn try_from(tolerance: f64) -> Result<Self, Self::Error> {
        Self::new(tolerance)
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

/// Sets the default tolerance for trimming near-zero leading coefficients off
/// division remainders, for the current thread.
///
/// Can also be set via the environment variable
/// `STURM_ROOTS_REMAINDER_TOLERANCE`. The environment variable has higher
/// precedence than this function.
///
/// The default is `1e-14`.
pub fn set_remainder_tolerance(tolerance: f64) -> Result<(), PolynomialError> {
    let tolerance = Tolerance::from_env_or(Some(Tolerance::new(tolerance)?));
    CONFIG.with(|c| c.borrow_mut().remainder_tolerance = tolerance);
    Ok(())
}

/// The effective default tolerance of the current thread.
pub fn remainder_tolerance() -> Tolerance {
    CONFIG.with(|c| c.borrow().remainder_tolerance)
}

#[cfg(test)]
mod test_config {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[test]
    fn built_in_default_is_used_without_environment_variable() {
        if std::env::var(Tolerance::ENV_VAR).is_ok() {
            return;
        }
        assert_eq!(1e-14, Tolerance::default().value());
    }

    #[test]
    fn setting_tolerance_changes_default_of_current_thread_only() {
        if std::env::var(Tolerance::ENV_VAR).is_ok() {
            return;
        }

        let other_thread = std::thread::spawn(|| {
            set_remainder_tolerance(1e-3).unwrap();
            remainder_tolerance().value()
        });
        assert_eq!(1e-3, other_thread.join().unwrap());
        assert_eq!(1e-14, remainder_tolerance().value());
    }

    #[test]
    fn environment_variable_takes_precedence_over_configured_value() {
        let configured = Some(Tolerance::new(1e-3).unwrap());
        assert_eq!(0.25, Tolerance::resolve(Some("0.25"), configured).value());
        assert_eq!(0.25, Tolerance::resolve(Some("0.25"), None).value());
        assert_eq!(1e-3, Tolerance::resolve(None, configured).value());
        assert_eq!(1e-14, Tolerance::resolve(None, None).value());
    }

    #[test]
    fn invalid_environment_variable_is_ignored() {
        for invalid in ["-1", "abc", "", "NaN", "inf"] {
            let tolerance = Tolerance::resolve(Some(invalid), None);
            assert_eq!(1e-14, tolerance.value(), "{invalid:?}");

            let configured = Some(Tolerance::new(1e-3).unwrap());
            let tolerance = Tolerance::resolve(Some(invalid), configured);
            assert_eq!(1e-3, tolerance.value(), "{invalid:?}");
        }
    }

    #[test]
    fn environment_variable_is_trimmed() {
        assert_eq!(0.5, Tolerance::resolve(Some("  0.5\n"), None).value());
        assert_eq!(0.0, Tolerance::resolve(Some("\t0 "), None).value());
    }

    #[test]
    fn invalid_tolerances_are_rejected() {
        for invalid in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Tolerance::new(invalid).unwrap_err();
            assert!(matches!(err, PolynomialError::InvalidTolerance(_)));
        }
        assert!(set_remainder_tolerance(-0.5).is_err());
    }

    #[test]
    fn nan_is_never_negligible() {
        assert!(!Tolerance::new(1.0).unwrap().is_negligible(f64::NAN));
        assert!(Tolerance::EXACT.is_negligible(0.0));
        assert!(Tolerance::EXACT.is_negligible(-0.0));
        assert!(!Tolerance::EXACT.is_negligible(f64::MIN_POSITIVE));
    }

    #[test]
    fn tolerance_deserialization_validates() {
        let tolerance: Tolerance = serde_json::from_str("0.001").unwrap();
        assert_eq!(1e-3, tolerance.value());
        assert!(serde_json::from_str::<Tolerance>("-0.001").is_err());
    }

    #[proptest]
    fn valid_tolerances_are_accepted(#[strategy(0.0..1e10_f64)] tolerance: f64) {
        prop_assert_eq!(tolerance, Tolerance::new(tolerance).unwrap().value());
    }
}
