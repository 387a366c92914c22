//! Settings
//!
//! Explicit configuration structs for everything that was a fixed constant
//! in earlier revisions of these tools. Defaults reproduce the values BlueZ
//! interop was validated against; an optional JSON file (path taken from the
//! `JETSON_BLE_CONFIG` environment variable) can override them.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional settings file.
pub const CONFIG_ENV_VAR: &str = "JETSON_BLE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_false(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_target: default_true(),
            ansi_colors: default_true(),
        }
    }
}

/// What to do when the daemon rejects a registration call.
///
/// `Fatal` aborts startup before the event loop is entered. `LogAndContinue`
/// logs the rejection and idles anyway, which matches the historical
/// behavior of the scripts these tools replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    #[default]
    Fatal,
    LogAndContinue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GattSettings {
    #[serde(default = "default_adapter_path")]
    pub adapter_path: String,
    #[serde(default = "default_application_path")]
    pub application_path: String,
    #[serde(default = "default_battery_service_uuid")]
    pub battery_service_uuid: String,
}

impl Default for GattSettings {
    fn default() -> Self {
        Self {
            adapter_path: default_adapter_path(),
            application_path: default_application_path(),
            battery_service_uuid: default_battery_service_uuid(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisingSettings {
    #[serde(default = "default_adapter_path")]
    pub adapter_path: String,
    #[serde(default = "default_advertisement_path")]
    pub advertisement_path: String,
    #[serde(default = "default_local_name")]
    pub local_name: String,
    #[serde(default = "default_true")]
    pub include_tx_power: bool,
    /// Adapter alias to set before advertising. `None` leaves the adapter
    /// name untouched.
    #[serde(default = "default_adapter_alias")]
    pub adapter_alias: Option<String>,
}

impl Default for AdvertisingSettings {
    fn default() -> Self {
        Self {
            adapter_path: default_adapter_path(),
            advertisement_path: default_advertisement_path(),
            local_name: default_local_name(),
            include_tx_power: default_true(),
            adapter_alias: default_adapter_alias(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub registration_policy: RegistrationPolicy,
    #[serde(default)]
    pub gatt: GattSettings,
    #[serde(default)]
    pub advertising: AdvertisingSettings,
}

impl Settings {
    /// Load settings from the file named by `JETSON_BLE_CONFIG`, falling
    /// back to the built-in defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "jetson-ble".to_string()
}
fn default_adapter_path() -> String {
    "/org/bluez/hci0".to_string()
}
fn default_application_path() -> String {
    "/com/example/gatt".to_string()
}
fn default_battery_service_uuid() -> String {
    "180F".to_string()
}
fn default_advertisement_path() -> String {
    "/org/test/advertisement".to_string()
}
fn default_local_name() -> String {
    "JetsonBLE".to_string()
}
fn default_adapter_alias() -> Option<String> {
    Some(default_local_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bluez_contract() {
        let settings = Settings::default();

        assert_eq!(settings.gatt.adapter_path, "/org/bluez/hci0");
        assert_eq!(settings.gatt.application_path, "/com/example/gatt");
        assert_eq!(settings.gatt.battery_service_uuid, "180F");
        assert_eq!(
            settings.advertising.advertisement_path,
            "/org/test/advertisement"
        );
        assert_eq!(settings.advertising.local_name, "JetsonBLE");
        assert!(settings.advertising.include_tx_power);
        assert_eq!(settings.registration_policy, RegistrationPolicy::Fatal);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "registration_policy": "log_and_continue",
                "advertising": { "local_name": "TestRig", "adapter_alias": null }
            }"#,
        )
        .unwrap();

        assert_eq!(
            settings.registration_policy,
            RegistrationPolicy::LogAndContinue
        );
        assert_eq!(settings.advertising.local_name, "TestRig");
        assert_eq!(settings.advertising.adapter_alias, None);
        // Untouched sections keep the defaults.
        assert_eq!(settings.gatt.battery_service_uuid, "180F");
        assert_eq!(settings.log.level, "info");
    }
}
