// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the vendor printer SDK is absent.
//
// `supports_printing` is false, so the screen never reaches these methods in
// normal operation; they still answer `PlatformUnavailable` if called.

use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::{Permission, PermissionGrants, PickOutcome, PickRequest, PickedFile};

use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn supports_printing(&self) -> bool {
        false
    }
}

impl PermissionService for StubBridge {
    async fn request_permissions(&self, _permissions: &[Permission]) -> Result<PermissionGrants> {
        tracing::warn!("PermissionService::request_permissions called on stub bridge");
        Err(ZebraPrintError::PlatformUnavailable)
    }
}

impl NativeDiscovery for StubBridge {
    async fn discover_printers(&self) -> Result<String> {
        tracing::warn!("NativeDiscovery::discover_printers called on stub bridge");
        Err(ZebraPrintError::PlatformUnavailable)
    }
}

impl NativePrint for StubBridge {
    async fn print_pdf(&self, _file: &PickedFile, _address: &str) -> Result<()> {
        tracing::warn!("NativePrint::print_pdf called on stub bridge");
        Err(ZebraPrintError::PlatformUnavailable)
    }

    async fn print_test_label(&self, _address: &str) -> Result<()> {
        tracing::warn!("NativePrint::print_test_label called on stub bridge");
        Err(ZebraPrintError::PlatformUnavailable)
    }
}

impl DocumentPicker for StubBridge {
    async fn pick_document(&self, _request: &PickRequest) -> Result<PickOutcome> {
        tracing::warn!("DocumentPicker::pick_document called on stub bridge");
        Err(ZebraPrintError::PlatformUnavailable)
    }
}
