// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zebraprint Print — platform-independent printer logic: decoding native
// discovery payloads, the PDF job pre-flight run over a printer link, and
// test label programs.

pub mod discovery;
pub mod link;
pub mod pdf_job;
pub mod test_label;

pub use discovery::parse_discovery_payload;
pub use link::PrinterLink;
pub use pdf_job::PdfJob;
