// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::path::Path;
use std::time::Duration;

/// Confirmation depth requested from the provider
pub const DEFAULT_REQUIRED_CONFIRMATIONS: u64 = 1;
/// Upper bound on a single confirmation watch (5 minutes)
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 300;
/// How often the watch polls for the receipt. Eth block time is ~12s,
/// polling faster than a few seconds only burns RPC quota.
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 3000;

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackerConfig {
    // Confirmation depth to wait for before reporting a transaction as mined.
    #[serde(default = "default_required_confirmations")]
    pub required_confirmations: u64,
    // Give up watching a transaction after this many seconds.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
    // Receipt polling interval in milliseconds.
    #[serde(default = "default_receipt_poll_interval_ms")]
    pub receipt_poll_interval_ms: u64,
    // Whether transactions whose watch failed or timed out are removed from
    // the pending list. When false they stay listed and the application is
    // responsible for reconciling them.
    #[serde(default = "default_remove_on_failure")]
    pub remove_on_failure: bool,
}

fn default_required_confirmations() -> u64 {
    DEFAULT_REQUIRED_CONFIRMATIONS
}

fn default_confirmation_timeout_secs() -> u64 {
    DEFAULT_CONFIRMATION_TIMEOUT_SECS
}

fn default_receipt_poll_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

fn default_remove_on_failure() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            required_confirmations: DEFAULT_REQUIRED_CONFIRMATIONS,
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            remove_on_failure: true,
        }
    }
}

impl TrackerConfig {
    /// Load the config from a YAML file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading tracker config from {:?}", path))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing tracker config from {:?}", path))
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.required_confirmations, 1);
        assert_eq!(config.confirmation_timeout_secs, 300);
        assert_eq!(config.receipt_poll_interval_ms, 3000);
        assert!(config.remove_on_failure);
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(300));
        assert_eq!(config.receipt_poll_interval(), Duration::from_millis(3000));
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: TrackerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.required_confirmations, 1);
        assert_eq!(config.confirmation_timeout_secs, 300);
        assert!(config.remove_on_failure);
    }

    #[test]
    fn test_kebab_case_fields() {
        let yaml = r#"
required-confirmations: 6
confirmation-timeout-secs: 120
receipt-poll-interval-ms: 500
remove-on-failure: false
"#;
        let config: TrackerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.required_confirmations, 6);
        assert_eq!(config.confirmation_timeout_secs, 120);
        assert_eq!(config.receipt_poll_interval_ms, 500);
        assert!(!config.remove_on_failure);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "confirmation-timeout-secs: 60").unwrap();
        let config = TrackerConfig::load(file.path()).unwrap();
        assert_eq!(config.confirmation_timeout_secs, 60);
        assert_eq!(config.required_confirmations, 1);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = TrackerConfig::load("/nonexistent/tracker.yaml").unwrap_err();
        assert!(err.to_string().contains("reading tracker config"));
    }
}
