use thiserror::Error;

/// Step-control configuration for the adaptive RK4 integrator.
///
/// - `safety` (`S1`) scales the estimated step to stay below the error target.
/// - `growth_limit` (`S2`) bounds how much one attempt may grow or shrink the
///   step: the next step always lies in `[dt / S2, S2 · dt]`.
/// - `max_retries` caps how many times a single advance may be rejected.
/// - `error_floor` is the smallest magnitude used as the denominator of the
///   relative-error estimate. The default of zero divides by the raw
///   component, so states should keep their components away from exact zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    safety: f64,
    growth_limit: f64,
    max_retries: usize,
    error_floor: f64,
}

/// Errors that can occur when validating an adaptive RK4 config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("safety must be finite and in (0, 1]")]
    Safety,

    #[error("growth_limit must be finite and greater than 1")]
    GrowthLimit,

    #[error("error_floor must be finite and non-negative")]
    ErrorFloor,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(0.9, 4.0, 100).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated step-control factors.
    ///
    /// The error floor starts at zero; see [`Config::with_error_floor`].
    ///
    /// # Errors
    ///
    /// Returns an error if `safety` is outside `(0, 1]` or `growth_limit` is
    /// not greater than one.
    pub fn new(safety: f64, growth_limit: f64, max_retries: usize) -> Result<Self, ConfigError> {
        if !safety.is_finite() || safety <= 0.0 || safety > 1.0 {
            return Err(ConfigError::Safety);
        }
        if !growth_limit.is_finite() || growth_limit <= 1.0 {
            return Err(ConfigError::GrowthLimit);
        }

        Ok(Self {
            safety,
            growth_limit,
            max_retries,
            error_floor: 0.0,
        })
    }

    /// Returns a copy of this config with the given relative-error floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `floor` is negative or non-finite.
    pub fn with_error_floor(self, floor: f64) -> Result<Self, ConfigError> {
        if !floor.is_finite() || floor < 0.0 {
            return Err(ConfigError::ErrorFloor);
        }

        Ok(Self {
            error_floor: floor,
            ..self
        })
    }

    /// Returns the safety factor `S1`.
    #[must_use]
    pub fn safety(&self) -> f64 {
        self.safety
    }

    /// Returns the growth limit `S2`.
    #[must_use]
    pub fn growth_limit(&self) -> f64 {
        self.growth_limit
    }

    /// Returns the maximum number of rejections allowed for one advance.
    #[must_use]
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Returns the relative-error denominator floor.
    #[must_use]
    pub fn error_floor(&self) -> f64 {
        self.error_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factors() {
        let config = Config::default();

        assert_eq!(config.safety(), 0.9);
        assert_eq!(config.growth_limit(), 4.0);
        assert_eq!(config.max_retries(), 100);
        assert_eq!(config.error_floor(), 0.0);
    }

    #[test]
    fn rejects_bad_safety() {
        for safety in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert_eq!(Config::new(safety, 4.0, 10), Err(ConfigError::Safety));
        }
        assert!(Config::new(1.0, 4.0, 10).is_ok());
    }

    #[test]
    fn rejects_bad_growth_limit() {
        for limit in [1.0, 0.5, f64::NAN, f64::INFINITY] {
            assert_eq!(Config::new(0.9, limit, 10), Err(ConfigError::GrowthLimit));
        }
    }

    #[test]
    fn error_floor_is_validated() {
        let config = Config::default();

        assert_eq!(
            config.with_error_floor(-1e-3),
            Err(ConfigError::ErrorFloor)
        );
        assert_eq!(
            config.with_error_floor(f64::NAN),
            Err(ConfigError::ErrorFloor)
        );

        let floored = config.with_error_floor(1e-6).unwrap();
        assert_eq!(floored.error_floor(), 1e-6);
        assert_eq!(floored.safety(), config.safety());
    }
}
