// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zebraprint — Native platform bridge.
//
// The screen talks to the OS permission service, the vendor printer SDK and
// the document picker only through the traits in `traits`. Android gets a
// JNI implementation; every other target gets a stub on which discovery and
// printing are unavailable.

use zebraprint_core::AppConfig;

pub mod pending;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Bridge implementation for the compilation target.
#[cfg(target_os = "android")]
pub type DefaultBridge = android::AndroidBridge;

/// Bridge implementation for the compilation target.
#[cfg(not(target_os = "android"))]
pub type DefaultBridge = stub::StubBridge;

/// Construct the bridge for the target operating system.
pub fn platform_bridge(config: &AppConfig) -> DefaultBridge {
    #[cfg(target_os = "android")]
    {
        android::AndroidBridge::new().with_settle_delay(config.settle_delay())
    }
    #[cfg(not(target_os = "android"))]
    {
        tracing::debug!(?config, "no native printer bridge on this platform");
        stub::StubBridge
    }
}
