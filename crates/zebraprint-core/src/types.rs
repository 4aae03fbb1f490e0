// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Zebraprint screen.

use std::collections::HashMap;

use serde::Deserialize;

/// A printer found by the most recent discovery.
///
/// `id` is the position in the discovery response and is recomputed on every
/// scan; use `address` when a stable key is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPrinter {
    pub id: usize,
    /// Human-friendly Bluetooth device name.
    pub name: String,
    /// Bluetooth MAC address used to open the connection.
    pub address: String,
}

/// One element of the JSON array produced by native discovery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceRecord {
    #[serde(rename = "friendlyName")]
    pub friendly_name: String,
    pub address: String,
}

/// OS-level capabilities required before discovery may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    AccessFineLocation,
    BluetoothScan,
    BluetoothConnect,
}

/// Everything the permission gate asks for, in one request.
pub const REQUIRED_PERMISSIONS: [Permission; 3] = [
    Permission::AccessFineLocation,
    Permission::BluetoothScan,
    Permission::BluetoothConnect,
];

impl Permission {
    /// Android manifest permission name.
    pub fn android_name(&self) -> &'static str {
        match self {
            Self::AccessFineLocation => "android.permission.ACCESS_FINE_LOCATION",
            Self::BluetoothScan => "android.permission.BLUETOOTH_SCAN",
            Self::BluetoothConnect => "android.permission.BLUETOOTH_CONNECT",
        }
    }

    /// Reverse of [`Permission::android_name`].
    pub fn from_android_name(name: &str) -> Option<Self> {
        REQUIRED_PERMISSIONS
            .into_iter()
            .find(|p| p.android_name() == name)
    }
}

/// Per-permission answer from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Denied and the OS will no longer show the prompt.
    NeverAskAgain,
}

/// Result of a permission request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGrants(HashMap<Permission, PermissionStatus>);

impl PermissionGrants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, permission: Permission, status: PermissionStatus) {
        self.0.insert(permission, status);
    }

    pub fn status(&self, permission: Permission) -> Option<PermissionStatus> {
        self.0.get(&permission).copied()
    }

    /// Requested permissions that were not granted, in request order.
    /// Permissions the OS did not answer for count as denied.
    pub fn denied(&self, requested: &[Permission]) -> Vec<Permission> {
        requested
            .iter()
            .copied()
            .filter(|p| self.status(*p) != Some(PermissionStatus::Granted))
            .collect()
    }
}

impl FromIterator<(Permission, PermissionStatus)> for PermissionGrants {
    fn from_iter<I: IntoIterator<Item = (Permission, PermissionStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parameters handed to the document picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub mime_type: &'static str,
    /// Whether the picker should copy the document into the app cache.
    pub copy_to_cache: bool,
}

impl PickRequest {
    /// PDF documents only, read in place.
    pub fn pdf() -> Self {
        Self {
            mime_type: "application/pdf",
            copy_to_cache: false,
        }
    }
}

/// A document chosen by the user. Lives for one print invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// Location reference understood by the native side (e.g. `content://`).
    pub uri: String,
    /// Display name shown in the confirmation dialog.
    pub name: String,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PickedFile),
    Cancelled,
}

/// Printer-reported readiness flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrinterStatus {
    pub ready_to_print: bool,
    pub paused: bool,
    pub head_open: bool,
    pub paper_out: bool,
}

impl PrinterStatus {
    /// Why the printer refuses a job, or `None` when it is ready.
    pub fn not_ready_reason(&self) -> Option<&'static str> {
        if self.ready_to_print {
            None
        } else if self.paused {
            Some("printer paused")
        } else if self.head_open {
            Some("printer head open")
        } else if self.paper_out {
            Some("printer is out of paper")
        } else {
            Some("unknown printer error")
        }
    }
}

/// Control language the printer is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterLanguage {
    Zpl,
    Cpcl,
    LinePrint,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_record_uses_native_keys() {
        let record: DeviceRecord =
            serde_json::from_str(r#"{"friendlyName":"ZQ520","address":"00:11:22:33:44:55","rssi":-40}"#)
                .unwrap();
        assert_eq!(record.friendly_name, "ZQ520");
        assert_eq!(record.address, "00:11:22:33:44:55");
    }

    #[test]
    fn android_names_round_trip() {
        for p in REQUIRED_PERMISSIONS {
            assert_eq!(Permission::from_android_name(p.android_name()), Some(p));
        }
        assert_eq!(Permission::from_android_name("android.permission.CAMERA"), None);
    }

    #[test]
    fn missing_answer_counts_as_denied() {
        let grants: PermissionGrants = [
            (Permission::AccessFineLocation, PermissionStatus::Granted),
            (Permission::BluetoothScan, PermissionStatus::NeverAskAgain),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            grants.denied(&REQUIRED_PERMISSIONS),
            vec![Permission::BluetoothScan, Permission::BluetoothConnect]
        );
    }

    #[test]
    fn granted_set_has_no_denials() {
        let grants: PermissionGrants = REQUIRED_PERMISSIONS
            .into_iter()
            .map(|p| (p, PermissionStatus::Granted))
            .collect();
        assert!(grants.denied(&REQUIRED_PERMISSIONS).is_empty());
    }

    #[test]
    fn not_ready_reason_priority() {
        let ready = PrinterStatus {
            ready_to_print: true,
            ..Default::default()
        };
        assert_eq!(ready.not_ready_reason(), None);

        let paused_and_open = PrinterStatus {
            paused: true,
            head_open: true,
            ..Default::default()
        };
        assert_eq!(paused_and_open.not_ready_reason(), Some("printer paused"));

        let paper = PrinterStatus {
            paper_out: true,
            ..Default::default()
        };
        assert_eq!(paper.not_ready_reason(), Some("printer is out of paper"));

        assert_eq!(
            PrinterStatus::default().not_ready_reason(),
            Some("unknown printer error")
        );
    }

    #[test]
    fn pdf_pick_request_reads_in_place() {
        let req = PickRequest::pdf();
        assert_eq!(req.mime_type, "application/pdf");
        assert!(!req.copy_to_cache);
    }
}
