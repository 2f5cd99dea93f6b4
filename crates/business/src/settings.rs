use std::path::PathBuf;

use anyhow::{Result, anyhow};

use stockroom_verification::VerificationConfig;

pub const SKIP_VERIFICATION_VAR: &str = "STOCKROOM_SKIP_VERIFICATION";
pub const INVENTORY_VAR: &str = "STOCKROOM_INVENTORY";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_INVENTORY_PATH: &str = "inventory.json";
const DEFAULT_LOG_FILTER: &str = "info";

/// Process settings for the operator tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    pub skip_verification: bool,
    pub inventory_path: PathBuf,
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            skip_verification: false,
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Unset or blank values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let skip_verification = match get(SKIP_VERIFICATION_VAR) {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow!("{SKIP_VERIFICATION_VAR} must be a boolean, got {raw:?}"))?,
            None => defaults.skip_verification,
        };
        let inventory_path = get(INVENTORY_VAR).map(PathBuf::from).unwrap_or(defaults.inventory_path);
        let log_filter = get(LOG_FILTER_VAR).unwrap_or(defaults.log_filter);

        Ok(Self {
            skip_verification,
            inventory_path,
            log_filter,
        })
    }

    /// Gate configuration for a mutation on an item identified by `expected_scan`.
    pub fn verification_config(&self, expected_scan: Option<&str>) -> VerificationConfig {
        VerificationConfig {
            bypass: self.skip_verification,
            expected_scan: expected_scan
                .filter(|code| !code.trim().is_empty())
                .map(str::to_string),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<AppSettings> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        assert_eq!(settings(&[]).unwrap(), AppSettings::default());
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let s = settings(&[
            (SKIP_VERIFICATION_VAR, "TRUE"),
            (INVENTORY_VAR, "/var/lib/stockroom/items.json"),
            (LOG_FILTER_VAR, "stockroom=debug"),
        ])
        .unwrap();
        assert!(s.skip_verification);
        assert_eq!(s.inventory_path, PathBuf::from("/var/lib/stockroom/items.json"));
        assert_eq!(s.log_filter, "stockroom=debug");
    }

    #[test]
    fn blank_values_fall_back() {
        let s = settings(&[(SKIP_VERIFICATION_VAR, " "), (LOG_FILTER_VAR, "")]).unwrap();
        assert!(!s.skip_verification);
        assert_eq!(s.log_filter, "info");
    }

    #[test]
    fn malformed_flag_is_an_error() {
        let err = settings(&[(SKIP_VERIFICATION_VAR, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(SKIP_VERIFICATION_VAR));
    }

    #[test]
    fn verification_config_follows_the_bypass_flag() {
        let s = settings(&[(SKIP_VERIFICATION_VAR, "1")]).unwrap();
        let config = s.verification_config(Some("OIL-5W30-001"));
        assert!(config.bypass);
        assert_eq!(config.expected_scan.as_deref(), Some("OIL-5W30-001"));

        let config = AppSettings::default().verification_config(Some("  "));
        assert!(!config.bypass);
        assert_eq!(config.expected_scan, None);
    }
}
