//! Device HTTP configuration.

use serde::Deserialize;

/// How to reach the devices' control API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JapHttpConfig {
    /// TCP port the devices serve HTTP on.
    pub port: u16,
    /// Path of the command-line endpoint.
    pub command_path: String,
    /// Command sent to trigger a reboot.
    pub reboot_command: String,
    /// Overall timeout for a reboot request, in milliseconds.
    pub reboot_timeout_ms: u64,
    /// Connect timeout for a status probe, in milliseconds.
    pub probe_connect_timeout_ms: u64,
    /// Overall timeout for a status probe, in milliseconds.
    pub probe_timeout_ms: u64,
}

impl Default for JapHttpConfig {
    fn default() -> Self {
        Self {
            port: 80,
            command_path: "/cgi-bin/api/command/cli".to_string(),
            reboot_command: "reboot".to_string(),
            reboot_timeout_ms: 3_000,
            probe_connect_timeout_ms: 1_000,
            probe_timeout_ms: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_device_defaults() {
        let config = JapHttpConfig::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.command_path, "/cgi-bin/api/command/cli");
        assert_eq!(config.reboot_command, "reboot");
        assert_eq!(config.reboot_timeout_ms, 3_000);
        assert_eq!(config.probe_connect_timeout_ms, 1_000);
        assert_eq!(config.probe_timeout_ms, 2_000);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: JapHttpConfig = toml::from_str("probe_timeout_ms = 500").unwrap();
        assert_eq!(config.probe_timeout_ms, 500);
        assert_eq!(config.port, 80);
        assert_eq!(config.reboot_command, "reboot");
    }
}
