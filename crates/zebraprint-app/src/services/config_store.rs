// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file persistence.

use std::path::Path;

use tracing::{info, warn};

use zebraprint_core::AppConfig;
use zebraprint_core::error::Result;

const CONFIG_FILE: &str = "config.json";

/// Read `config.json` from `data_dir`. `None` when missing or unreadable.
pub fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

/// Load the config, falling back to defaults. A missing file is created with
/// the defaults so they can be edited; a malformed one is left alone.
pub fn load_or_init(data_dir: &Path) -> AppConfig {
    if let Some(config) = load_config(data_dir) {
        info!(path = %data_dir.display(), "config loaded");
        return config;
    }

    let config = AppConfig::default();
    if !data_dir.join(CONFIG_FILE).exists() {
        if let Err(e) = persist_config(data_dir, &config) {
            warn!(error = %e, "could not write default config");
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_or_init(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(load_config(dir.path()), Some(AppConfig::default()));
    }

    #[test]
    fn persisted_values_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            notify_print_success: true,
            discovery_timeout_ms: 15_000,
            ..AppConfig::default()
        };

        persist_config(dir.path(), &config).unwrap();
        assert_eq!(load_or_init(dir.path()), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"toast_duration_ms": 3500}"#).unwrap();

        let config = load_or_init(dir.path());
        assert_eq!(config.toast_duration_ms, 3500);
        assert_eq!(config.print_timeout_ms, AppConfig::default().print_timeout_ms);
    }

    #[test]
    fn malformed_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_or_init(dir.path()), AppConfig::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
