// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Abstract connection to a label printer.
//
// The vendor SDK calls behind this trait are blocking, so implementations
// are driven from a blocking thread, never from the UI task.

use std::path::Path;

use zebraprint_core::error::Result;
use zebraprint_core::types::{PrinterLanguage, PrinterStatus};

/// A connection to a single printer, addressed by its Bluetooth MAC.
pub trait PrinterLink {
    /// Address this link was created for.
    fn address(&self) -> &str;

    fn open(&mut self) -> Result<()>;

    /// Read a Set-Get-Do setting (e.g. `apl.enable`).
    fn get_setting(&mut self, key: &str) -> Result<String>;

    fn current_status(&mut self) -> Result<PrinterStatus>;

    fn control_language(&mut self) -> Result<PrinterLanguage>;

    /// Stream a file to the printer. `progress` receives `(written, total)`
    /// byte counts as the transfer advances.
    fn send_file(&mut self, path: &Path, progress: &mut dyn FnMut(u64, u64)) -> Result<()>;

    /// Write raw bytes (printer language programs).
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}
