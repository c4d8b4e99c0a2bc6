use serde::Deserialize;
use std::time::Duration;

mod validation;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/wallclock/config.toml";

/// Identifier of the surface the clock mounts on when none is configured.
pub const DEFAULT_TARGET: &str = "app";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl ClockConfig {
    /// Refresh period between two renders.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_target() -> String {
    DEFAULT_TARGET.to_owned()
}

fn default_interval_ms() -> u64 {
    1000
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TerminalConfig {
    #[serde(default = "default_in_place")]
    pub in_place: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            in_place: default_in_place(),
        }
    }
}

fn default_in_place() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clock: ClockConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}
