//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Hourly wage used until the user configures one.
pub const DEFAULT_HOURLY_WAGE: f64 = 25.0;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Pay rate snapshotted onto each new break.
    pub hourly_wage: f64,
    /// Prefix for money amounts.
    pub currency_symbol: String,
    /// Live display refresh interval in milliseconds.
    pub tick_interval_ms: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("hourly_wage", &self.hourly_wage)
            .field("currency_symbol", &self.currency_symbol)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("pto.db"),
            hourly_wage: DEFAULT_HOURLY_WAGE,
            currency_symbol: "$".to_string(),
            tick_interval_ms: u64::try_from(pto_core::TICK_INTERVAL.as_millis())
                .unwrap_or(100),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PTO_*)
        figment = figment.merge(Env::prefixed("PTO_"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn validate(&self) -> Result<(), figment::Error> {
        if !self.hourly_wage.is_finite() || self.hourly_wage <= 0.0 {
            return Err(figment::Error::from(format!(
                "hourly_wage must be a positive number, got {}",
                self.hourly_wage
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(figment::Error::from(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Returns the platform-specific config directory for pto.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pto"))
}

/// Returns the platform-specific data directory for pto.
///
/// On Linux: `~/.local/share/pto`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("pto"))
}
