use super::Config;

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The refresh interval must be strictly positive.
    ZeroInterval,

    /// The clock must name the surface it mounts on.
    EmptyTarget,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "clock interval_ms must be greater than zero"),
            Self::EmptyTarget => write!(f, "clock target must not be empty"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if the refresh interval is zero or
    /// the target identifier is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use wallclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.clock.interval_ms == 0 {
            return Err(ConfigValidationError::ZeroInterval);
        }

        if self.clock.target.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTarget);
        }

        Ok(())
    }
}
