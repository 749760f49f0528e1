use serde::{Deserialize, Serialize};

use crate::variables::VariableKind;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub interval: IntervalDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which variable kinds the registry offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Enabled kinds (default: all built-in kinds).
    #[serde(default = "default_kinds")]
    pub kinds: Vec<VariableKind>,
}

/// Blank-state values for new interval variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalDefaults {
    /// Comma-separated interval choices.
    #[serde(default = "default_interval_values")]
    pub values: String,
    /// Number of steps the auto option divides the time range into (default: 30).
    #[serde(default = "default_auto_count")]
    pub auto_count: u32,
    /// Lower bound for the auto option (default: "10s").
    #[serde(default = "default_auto_min")]
    pub auto_min: String,
}

/// Logging settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (default: "warn").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_kinds() -> Vec<VariableKind> {
    VariableKind::ALL.to_vec()
}

fn default_interval_values() -> String {
    "1m,10m,30m,1h,6h,12h,1d,7d,14d,30d".to_string()
}

fn default_auto_count() -> u32 {
    30
}

fn default_auto_min() -> String {
    "10s".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            kinds: default_kinds(),
        }
    }
}

impl Default for IntervalDefaults {
    fn default() -> Self {
        Self {
            values: default_interval_values(),
            auto_count: default_auto_count(),
            auto_min: default_auto_min(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
