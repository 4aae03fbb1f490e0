// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upper bound on a native discovery scan.
    pub discovery_timeout_ms: u64,
    /// Upper bound on a native PDF transfer.
    pub print_timeout_ms: u64,
    /// Show a notification when the permission gate blocks discovery.
    pub notify_permission_denied: bool,
    /// Show a notification when a print job completes.
    pub notify_print_success: bool,
    /// How long a transient notification stays on screen.
    pub toast_duration_ms: u64,
    /// Pause after the last PDF byte before the printer link is closed.
    pub settle_delay_ms: u64,
}

impl AppConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn print_timeout(&self) -> Duration {
        Duration::from_millis(self.print_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: 60_000,
            print_timeout_ms: 120_000,
            notify_permission_denied: true,
            notify_print_success: false,
            toast_duration_ms: 2_000,
            settle_delay_ms: 500,
        }
    }
}
