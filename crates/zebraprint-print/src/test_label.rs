// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test label: a 2 x 2 inch box with the word "TEST" inside it, in the
// printer's own control language.

use tracing::info;

use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::PrinterLanguage;

use crate::link::PrinterLink;

const ZPL_TEST_LABEL: &str = "^XA^FO17,16^GB379,371,8^FS^FT65,255^A0N,135,134^FDTEST^FS^XZ";

const CPCL_TEST_LABEL: &str = "! 0 200 200 406 1\r\n\
                               ON-FEED IGNORE\r\n\
                               BOX 20 20 380 380 8\r\n\
                               T 0 6 137 177 TEST\r\n\
                               PRINT\r\n";

/// Test label program for `language`, if one exists.
pub fn test_label(language: PrinterLanguage) -> Option<&'static [u8]> {
    match language {
        PrinterLanguage::Zpl => Some(ZPL_TEST_LABEL.as_bytes()),
        // line print mode still interprets CPCL
        PrinterLanguage::Cpcl | PrinterLanguage::LinePrint => Some(CPCL_TEST_LABEL.as_bytes()),
        PrinterLanguage::Unknown => None,
    }
}

/// Open `link`, print the test label in the printer's language, close.
pub fn print_test_label(link: &mut dyn PrinterLink) -> Result<()> {
    link.open()?;

    let outcome = link.control_language().and_then(|language| {
        let label = test_label(language).ok_or_else(|| {
            ZebraPrintError::Print(format!("no test label for {language:?} printers"))
        })?;
        info!(address = link.address(), ?language, bytes = label.len(), "writing test label");
        link.write(label)
    });

    let closed = link.close();
    outcome.and(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf_job::tests::MockLink;

    #[test]
    fn cpcl_label_lines() {
        let label = std::str::from_utf8(test_label(PrinterLanguage::Cpcl).unwrap()).unwrap();
        assert!(label.starts_with("! 0 200 200 406 1\r\nON-FEED IGNORE\r\n"));
        assert!(label.ends_with("PRINT\r\n"));
        assert_eq!(test_label(PrinterLanguage::LinePrint), test_label(PrinterLanguage::Cpcl));
    }

    #[test]
    fn unknown_language_has_no_label() {
        assert!(test_label(PrinterLanguage::Unknown).is_none());
    }

    #[test]
    fn zpl_printer_gets_zpl() {
        let mut link = MockLink {
            language: Some(PrinterLanguage::Zpl),
            ..Default::default()
        };
        print_test_label(&mut link).unwrap();
        assert_eq!(link.written, ZPL_TEST_LABEL.as_bytes());
        assert_eq!(link.calls, vec!["open", "language", "write", "close"]);
    }

    #[test]
    fn unknown_language_still_closes() {
        let mut link = MockLink {
            language: Some(PrinterLanguage::Unknown),
            ..Default::default()
        };
        assert!(print_test_label(&mut link).is_err());
        assert!(link.written.is_empty());
        assert_eq!(link.calls.last().map(String::as_str), Some("close"));
    }
}
