// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Zebraprint.
//
// Errors reported by the native side carry the native text verbatim; that
// text is what the user sees in the transient notification.

use thiserror::Error;

/// Top-level error type for all Zebraprint operations.
#[derive(Debug, Error)]
pub enum ZebraPrintError {
    // -- Permission gate --
    #[error("required permissions not granted: {}", .0.join(", "))]
    PermissionDenied(Vec<String>),

    // -- Discovery --
    #[error("{0}")]
    Discovery(String),

    #[error("malformed discovery payload: {0}")]
    MalformedPayload(String),

    #[error("Printer not found")]
    NoPrintersFound,

    // -- Printing --
    #[error("{0}")]
    Print(String),

    #[error("Printer does not support PDF Printing")]
    PdfUnsupported,

    /// The printer answered but is not ready; the payload names the cause.
    #[error("Printer is not ready!")]
    PrinterNotReady(String),

    #[error("no discovered printer has address {0}")]
    UnknownPrinter(String),

    // -- Screen orchestration --
    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("{operation} timed out after {after_ms} ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    #[error("document picker failed: {0}")]
    PickFailed(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ZebraPrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_text_is_shown_verbatim() {
        let err = ZebraPrintError::Discovery("Bluetooth disabled".into());
        assert_eq!(err.to_string(), "Bluetooth disabled");

        let err = ZebraPrintError::Print("Printer not reachable".into());
        assert_eq!(err.to_string(), "Printer not reachable");
    }

    #[test]
    fn permission_denied_lists_permissions() {
        let err = ZebraPrintError::PermissionDenied(vec![
            "android.permission.BLUETOOTH_SCAN".into(),
            "android.permission.BLUETOOTH_CONNECT".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "required permissions not granted: android.permission.BLUETOOTH_SCAN, android.permission.BLUETOOTH_CONNECT"
        );
    }

    #[test]
    fn not_ready_hides_cause_from_user() {
        let err = ZebraPrintError::PrinterNotReady("head open".into());
        assert_eq!(err.to_string(), "Printer is not ready!");
    }
}
