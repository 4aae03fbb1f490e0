// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF print job over a printer link.
//
// Zebra mobile printers only render PDF when the PDF virtual device is
// enabled (`apl.enable` = `pdf`), and they silently drop data while paused,
// with the head open or out of media. Both conditions are checked before a
// single byte of the document is sent.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use zebraprint_core::error::{Result, ZebraPrintError};

use crate::link::PrinterLink;

/// SGD setting that selects the printer's virtual device.
pub const PDF_SETTING: &str = "apl.enable";

/// Value of [`PDF_SETTING`] when PDF printing is enabled.
pub const PDF_ENABLED: &str = "pdf";

/// Default pause between the end of the transfer and closing the link.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// A single PDF document destined for one printer.
#[derive(Debug, Clone)]
pub struct PdfJob {
    path: PathBuf,
    settle_delay: Duration,
}

impl PdfJob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Override how long to wait for buffered data to reach the printer.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Run the job to completion on the calling (blocking) thread.
    ///
    /// The link is always closed. A close failure is only reported when the
    /// job itself succeeded.
    pub fn run(&self, link: &mut dyn PrinterLink) -> Result<()> {
        info!(address = link.address(), path = %self.path.display(), "starting PDF job");
        link.open()?;

        let outcome = self.send(link);

        match (outcome, link.close()) {
            (Ok(()), Ok(())) => {
                info!(address = link.address(), "PDF job finished");
                Ok(())
            }
            (Ok(()), Err(e)) => {
                error!(address = link.address(), error = %e, "closing printer link failed");
                Err(e)
            }
            (Err(e), close) => {
                if let Err(close_err) = close {
                    warn!(error = %close_err, "closing printer link failed after job error");
                }
                Err(e)
            }
        }
    }

    fn send(&self, link: &mut dyn PrinterLink) -> Result<()> {
        if !supports_pdf(link) {
            error!(address = link.address(), "printer does not support PDF printing");
            return Err(ZebraPrintError::PdfUnsupported);
        }

        let status = link.current_status()?;
        debug!(?status, "printer status");
        if let Some(reason) = status.not_ready_reason() {
            error!(address = link.address(), reason, "printer is not ready");
            return Err(ZebraPrintError::PrinterNotReady(reason.to_owned()));
        }

        let mut last_percent = None;
        link.send_file(&self.path, &mut |written, total| {
            let percent = percent_of(written, total);
            if last_percent != Some(percent) {
                last_percent = Some(percent);
                debug!(written, total, percent, "PDF transfer progress");
            }
        })?;

        if !self.settle_delay.is_zero() {
            std::thread::sleep(self.settle_delay);
        }
        Ok(())
    }
}

/// Whether the printer has its PDF virtual device enabled. A failed query
/// counts as "no".
pub fn supports_pdf(link: &mut dyn PrinterLink) -> bool {
    match link.get_setting(PDF_SETTING) {
        Ok(value) => value == PDF_ENABLED,
        Err(e) => {
            warn!(error = %e, "could not read {PDF_SETTING}");
            false
        }
    }
}

fn percent_of(written: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (written.min(total) * 100 / total) as u8
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use super::*;
    use zebraprint_core::types::{PrinterLanguage, PrinterStatus};

    /// Scripted link that records every call.
    #[derive(Default)]
    pub(crate) struct MockLink {
        pub apl_enable: Option<String>,
        pub status: PrinterStatus,
        pub language: Option<PrinterLanguage>,
        pub fail_open: bool,
        pub fail_send: bool,
        pub fail_close: bool,
        pub calls: Vec<String>,
        pub written: Vec<u8>,
        pub progress: Vec<(u64, u64)>,
    }

    impl MockLink {
        pub fn ready_pdf_printer() -> Self {
            Self {
                apl_enable: Some("pdf".into()),
                status: PrinterStatus {
                    ready_to_print: true,
                    ..Default::default()
                },
                ..Default::default()
            }
        }
    }

    impl PrinterLink for MockLink {
        fn address(&self) -> &str {
            "00:11:22:33:44:55"
        }

        fn open(&mut self) -> Result<()> {
            self.calls.push("open".into());
            if self.fail_open {
                return Err(ZebraPrintError::Print("Could not connect to device".into()));
            }
            Ok(())
        }

        fn get_setting(&mut self, key: &str) -> Result<String> {
            self.calls.push(format!("get:{key}"));
            self.apl_enable
                .clone()
                .ok_or_else(|| ZebraPrintError::Print("SGD read failed".into()))
        }

        fn current_status(&mut self) -> Result<PrinterStatus> {
            self.calls.push("status".into());
            Ok(self.status)
        }

        fn control_language(&mut self) -> Result<PrinterLanguage> {
            self.calls.push("language".into());
            self.language
                .ok_or_else(|| ZebraPrintError::Print("printer language unknown".into()))
        }

        fn send_file(&mut self, _path: &Path, progress: &mut dyn FnMut(u64, u64)) -> Result<()> {
            self.calls.push("send".into());
            if self.fail_send {
                return Err(ZebraPrintError::Print("Connection reset".into()));
            }
            for written in [0, 512, 1024] {
                self.progress.push((written, 1024));
                progress(written, 1024);
            }
            Ok(())
        }

        fn write(&mut self, bytes: &[u8]) -> Result<()> {
            self.calls.push("write".into());
            self.written.extend_from_slice(bytes);
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.calls.push("close".into());
            if self.fail_close {
                return Err(ZebraPrintError::Print("close failed".into()));
            }
            Ok(())
        }
    }

    fn job() -> PdfJob {
        PdfJob::new("/tmp/label.pdf").with_settle_delay(Duration::ZERO)
    }

    #[test]
    fn ready_printer_receives_file() {
        let mut link = MockLink::ready_pdf_printer();
        job().run(&mut link).unwrap();
        assert_eq!(link.calls, vec!["open", "get:apl.enable", "status", "send", "close"]);
        assert_eq!(link.progress.last(), Some(&(1024, 1024)));
    }

    #[test]
    fn pdf_disabled_is_rejected_before_sending() {
        let mut link = MockLink {
            apl_enable: Some("none".into()),
            ..MockLink::ready_pdf_printer()
        };
        let err = job().run(&mut link).unwrap_err();
        assert!(matches!(err, ZebraPrintError::PdfUnsupported));
        assert_eq!(link.calls, vec!["open", "get:apl.enable", "close"]);
    }

    #[test]
    fn unreadable_setting_counts_as_unsupported() {
        let mut link = MockLink {
            apl_enable: None,
            ..MockLink::ready_pdf_printer()
        };
        assert!(matches!(job().run(&mut link), Err(ZebraPrintError::PdfUnsupported)));
    }

    #[test]
    fn head_open_is_not_ready() {
        let mut link = MockLink {
            status: PrinterStatus {
                head_open: true,
                ..Default::default()
            },
            ..MockLink::ready_pdf_printer()
        };
        match job().run(&mut link) {
            Err(ZebraPrintError::PrinterNotReady(reason)) => assert_eq!(reason, "printer head open"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!link.calls.contains(&"send".to_string()));
        assert_eq!(link.calls.last().map(String::as_str), Some("close"));
    }

    #[test]
    fn open_failure_skips_close() {
        let mut link = MockLink {
            fail_open: true,
            ..MockLink::ready_pdf_printer()
        };
        let err = job().run(&mut link).unwrap_err();
        assert_eq!(err.to_string(), "Could not connect to device");
        assert_eq!(link.calls, vec!["open"]);
    }

    #[test]
    fn send_error_wins_over_close_error() {
        let mut link = MockLink {
            fail_send: true,
            fail_close: true,
            ..MockLink::ready_pdf_printer()
        };
        let err = job().run(&mut link).unwrap_err();
        assert_eq!(err.to_string(), "Connection reset");
    }

    #[test]
    fn close_error_reported_after_success() {
        let mut link = MockLink {
            fail_close: true,
            ..MockLink::ready_pdf_printer()
        };
        let err = job().run(&mut link).unwrap_err();
        assert_eq!(err.to_string(), "close failed");
    }

    #[test]
    fn percent_handles_empty_and_overrun() {
        assert_eq!(percent_of(0, 0), 100);
        assert_eq!(percent_of(50, 200), 25);
        assert_eq!(percent_of(300, 200), 100);
    }
}
