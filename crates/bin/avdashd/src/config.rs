//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `avdash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use avdash_adapter_http_axum::state::DashboardSettings;
use avdash_adapter_jap_http::JapHttpConfig;
use avdash_app::throttle::Throttle;
use avdash_domain::device::Device;
use avdash_domain::error::AvDashError;
use avdash_domain::fleet;
use avdash_domain::roster::Roster;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Dispatch pacing and dashboard timings.
    pub dispatch: DispatchConfig,
    /// How to reach the devices.
    pub device_http: JapHttpConfig,
    /// Device roster. The built-in fleet is used when absent.
    pub devices: Option<Vec<Device>>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Timing of bulk dispatch, background checks and busy controls.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Pause between consecutive reboots of a bulk run.
    pub throttle_ms: u64,
    /// Period of the background status check.
    pub status_interval_secs: u64,
    /// How long a single reboot control stays disabled.
    pub device_busy_ms: u64,
    /// How long the reboot-all control stays disabled.
    pub bulk_busy_ms: u64,
}

impl Config {
    /// Load configuration from `avdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("avdash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AVDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("AVDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("AVDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("AVDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.device_http.port == 0 {
            return Err(ConfigError::Validation(
                "device port must be non-zero".to_string(),
            ));
        }
        if self.dispatch.throttle_ms == 0 {
            return Err(ConfigError::Validation(
                "bulk throttle must be non-zero".to_string(),
            ));
        }
        if self.dispatch.status_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "status interval must be non-zero".to_string(),
            ));
        }
        self.roster()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the roster from the configured devices, or the built-in fleet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Roster`] if the device list is empty, holds an
    /// invalid entry, or repeats an address.
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        let devices = self.devices.clone().unwrap_or_else(fleet::builtin);
        Ok(Roster::new(devices)?)
    }

    #[must_use]
    pub fn throttle(&self) -> Throttle {
        Throttle::new(Duration::from_millis(self.dispatch.throttle_ms))
    }

    #[must_use]
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.dispatch.status_interval_secs)
    }

    /// Dashboard timings; pages reload at the status check period.
    #[must_use]
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            refresh_seconds: self.dispatch.status_interval_secs,
            device_busy: Duration::from_millis(self.dispatch.device_busy_ms),
            bulk_busy: Duration::from_millis(self.dispatch.bulk_busy_ms),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "avdash=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 250,
            status_interval_secs: 120,
            device_busy_ms: 2_000,
            bulk_busy_ms: 3_000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The device list does not form a valid roster.
    #[error("invalid device roster")]
    Roster(#[from] AvDashError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
