// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// Every native operation completes asynchronously on the host side, so each
// is exposed as an `async fn`. Callers are generic over the bridge; none of
// these traits is used as a trait object.

#![allow(async_fn_in_trait)]

use zebraprint_core::error::Result;
use zebraprint_core::types::{Permission, PermissionGrants, PickOutcome, PickRequest, PickedFile};

/// Unified bridge grouping every native capability the screen uses.
pub trait PlatformBridge: PermissionService + NativeDiscovery + NativePrint + DocumentPicker {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;

    /// Whether discovery and printing exist on this platform at all. When
    /// false the screen treats both as no-ops.
    fn supports_printing(&self) -> bool;
}

/// OS runtime permission prompts.
pub trait PermissionService {
    /// Request all `permissions` in a single prompt and report the answer
    /// for each one.
    async fn request_permissions(&self, permissions: &[Permission]) -> Result<PermissionGrants>;
}

/// Vendor SDK Bluetooth discovery.
pub trait NativeDiscovery {
    /// Scan for printers. Resolves to the JSON array of device records
    /// produced by the native side, or to the native error text.
    async fn discover_printers(&self) -> Result<String>;
}

/// Vendor SDK printing.
pub trait NativePrint {
    /// Send a PDF document to the printer at `address`.
    async fn print_pdf(&self, file: &PickedFile, address: &str) -> Result<()>;

    /// Print the built-in test label on the printer at `address`.
    async fn print_test_label(&self, address: &str) -> Result<()>;
}

/// System document picker.
pub trait DocumentPicker {
    /// Let the user choose one document matching `request`.
    async fn pick_document(&self, request: &PickRequest) -> Result<PickOutcome>;
}
