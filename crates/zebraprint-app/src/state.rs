// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen state — the printer list and the phase of the single operation the
// screen may run at a time.

use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::DiscoveredPrinter;

/// Where the screen is in its two flows:
/// `Idle → AwaitingPermission → Discovering → Idle` and
/// `Idle → Picking → Confirming → Printing → Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// OS permission prompt is up.
    AwaitingPermission,
    /// Native Bluetooth scan outstanding.
    Discovering,
    /// System document picker is up.
    Picking,
    /// Waiting for the user to confirm the print.
    Confirming,
    /// Native print call outstanding.
    Printing,
}

impl Phase {
    /// True while a native discovery or print call is outstanding.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Discovering | Self::Printing)
    }

    /// What the screen is doing, for "already in progress" rejections.
    pub fn activity(self) -> &'static str {
        match self {
            Self::Idle => "nothing",
            Self::AwaitingPermission => "permission request",
            Self::Discovering => "printer discovery",
            Self::Picking => "document selection",
            Self::Confirming => "print confirmation",
            Self::Printing => "printing",
        }
    }
}

/// Everything the screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    /// Printers from the last successful discovery, in discovery order.
    pub printers: Vec<DiscoveredPrinter>,
    pub phase: Phase,
}

impl ScreenState {
    /// The busy flag rendered as a spinner.
    pub fn busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Start a new operation. Only accepted while idle.
    pub fn begin(&mut self, phase: Phase) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(ZebraPrintError::Busy(self.phase.activity()));
        }
        self.phase = phase;
        Ok(())
    }

    /// Move the running operation to its next step.
    pub fn advance(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// End the running operation, whatever its outcome.
    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Replace the whole list with a fresh discovery result.
    pub fn replace_printers(&mut self, printers: Vec<DiscoveredPrinter>) {
        self.printers = printers;
    }

    pub fn printer_by_address(&self, address: &str) -> Option<&DiscoveredPrinter> {
        self.printers.iter().find(|p| p.address == address)
    }
}
