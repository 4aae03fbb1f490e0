// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen controller — the permission gate, discovery and print flows.
//
// The controller owns the screen state and mutates it only from its own
// operations; the UI surface is told to re-render after every change. It
// lives on the UI thread, so state sits in a `RefCell` and is never borrowed
// across an `.await`.

#![allow(async_fn_in_trait)]

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use zebraprint_bridge::traits::PlatformBridge;
use zebraprint_core::AppConfig;
use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::{PickOutcome, PickRequest, REQUIRED_PERMISSIONS};
use zebraprint_print::parse_discovery_payload;

use crate::state::{Phase, ScreenState};

/// Two-action confirmation dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

impl ConfirmPrompt {
    pub fn print_file(file_name: &str) -> Self {
        Self {
            title: "Print PDF File".into(),
            message: format!("Are you sure you want to print {file_name}?"),
            cancel_label: "Cancel",
            confirm_label: "Continue",
        }
    }
}

/// Everything the controller needs from the rendering layer.
pub trait ScreenUi {
    /// Show the new state.
    fn render(&self, state: &ScreenState);

    /// Short, self-dismissing notification.
    fn notify(&self, message: &str);

    /// Ask the user to confirm. Resolves exactly once; `false` means cancel.
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool;

    /// Informational dialog with a single dismiss action.
    fn acknowledge(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The list now holds this many printers.
    Found(usize),
    /// No native discovery on this platform; nothing happened.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed,
    /// The user backed out of the document picker.
    PickCancelled,
    /// The user cancelled the confirmation dialog.
    Declined,
    /// No native printing on this platform; nothing happened.
    Unsupported,
}

/// Controller for the printer screen. Cheap to clone; clones share state.
pub struct PrinterScreen<B, U> {
    inner: Rc<Inner<B, U>>,
}

impl<B, U> Clone for PrinterScreen<B, U> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<B, U> {
    bridge: B,
    ui: U,
    config: AppConfig,
    state: RefCell<ScreenState>,
}

impl<B: PlatformBridge, U: ScreenUi> PrinterScreen<B, U> {
    pub fn new(bridge: B, ui: U, config: AppConfig) -> Self {
        info!(platform = bridge.platform_name(), "printer screen ready");
        Self {
            inner: Rc::new(Inner {
                bridge,
                ui,
                config,
                state: RefCell::new(ScreenState::default()),
            }),
        }
    }

    #[cfg(test)]
    fn snapshot(&self) -> ScreenState {
        self.inner.state.borrow().clone()
    }

    // -- Discovery -----------------------------------------------------------

    /// Request permissions, scan for printers and replace the list.
    ///
    /// Failures are reported to the user here; the returned error is for
    /// callers that want to log or test it.
    pub async fn discover(&self) -> Result<DiscoveryOutcome> {
        let inner = &*self.inner;
        if !inner.bridge.supports_printing() {
            debug!(platform = inner.bridge.platform_name(), "discovery unavailable, ignoring");
            return Ok(DiscoveryOutcome::Unsupported);
        }

        let op = inner.start(Phase::AwaitingPermission)?;
        inner.permission_gate().await?;

        op.advance(Phase::Discovering);
        info!("printer discovery started");
        let found = timed(
            inner.config.discovery_timeout(),
            "printer discovery",
            inner.bridge.discover_printers(),
        )
        .await
        .and_then(|payload| parse_discovery_payload(&payload))
        .and_then(|printers| {
            if printers.is_empty() {
                Err(ZebraPrintError::NoPrintersFound)
            } else {
                Ok(printers)
            }
        });

        match found {
            Ok(printers) => {
                let count = printers.len();
                info!(count, "printer discovery finished");
                inner.update(|state| state.replace_printers(printers));
                Ok(DiscoveryOutcome::Found(count))
            }
            Err(e) => {
                error!(error = %e, "printer discovery failed");
                inner.ui.notify(&e.to_string());
                Err(e)
            }
        }
    }

    // -- Printing ------------------------------------------------------------

    /// Pick a PDF, confirm, and send it to the listed printer at `address`.
    pub async fn print_to(&self, address: &str) -> Result<PrintOutcome> {
        let inner = &*self.inner;
        if !inner.bridge.supports_printing() {
            debug!(platform = inner.bridge.platform_name(), "printing unavailable, ignoring");
            return Ok(PrintOutcome::Unsupported);
        }
        inner.ensure_listed(address)?;

        let op = inner.start(Phase::Picking)?;
        let file = match inner.bridge.pick_document(&PickRequest::pdf()).await {
            Ok(PickOutcome::Picked(file)) => file,
            Ok(PickOutcome::Cancelled) => {
                debug!("document pick cancelled");
                return Ok(PrintOutcome::PickCancelled);
            }
            Err(e) => {
                warn!(error = %e, "document pick failed");
                return Err(e);
            }
        };
        info!(file = %file.name, size = ?file.size, "document picked");

        op.advance(Phase::Confirming);
        if !inner.ui.confirm(ConfirmPrompt::print_file(&file.name)).await {
            info!(file = %file.name, "print cancelled by user");
            inner.ui.acknowledge("Print cancelled");
            return Ok(PrintOutcome::Declined);
        }

        op.advance(Phase::Printing);
        info!(address, file = %file.name, "sending PDF to printer");
        let printed = timed(
            inner.config.print_timeout(),
            "printing",
            inner.bridge.print_pdf(&file, address),
        )
        .await;
        inner.report_print(address, printed)
    }

    /// Print the built-in test label on the listed printer at `address`.
    pub async fn print_test_label(&self, address: &str) -> Result<PrintOutcome> {
        let inner = &*self.inner;
        if !inner.bridge.supports_printing() {
            debug!(platform = inner.bridge.platform_name(), "printing unavailable, ignoring");
            return Ok(PrintOutcome::Unsupported);
        }
        inner.ensure_listed(address)?;

        let op = inner.start(Phase::Printing)?;
        info!(address, "printing test label");
        let printed = timed(
            inner.config.print_timeout(),
            "printing",
            inner.bridge.print_test_label(address),
        )
        .await;
        let outcome = inner.report_print(address, printed);
        drop(op);
        outcome
    }
}

impl<B: PlatformBridge, U: ScreenUi> Inner<B, U> {
    /// Apply `f` to the state and re-render.
    fn update<R>(&self, f: impl FnOnce(&mut ScreenState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.ui.render(&self.state.borrow());
        result
    }

    /// Enter `phase` from idle, or reject because another operation runs.
    fn start(&self, phase: Phase) -> Result<Operation<'_, B, U>> {
        if let Err(e) = self.update(|state| state.begin(phase)) {
            warn!(error = %e, "ignoring trigger while busy");
            return Err(e);
        }
        Ok(Operation { inner: self })
    }

    fn ensure_listed(&self, address: &str) -> Result<()> {
        if self.state.borrow().printer_by_address(address).is_none() {
            warn!(address, "print requested for a printer not in the list");
            return Err(ZebraPrintError::UnknownPrinter(address.to_owned()));
        }
        Ok(())
    }

    /// Ask for every required permission; all must be granted.
    async fn permission_gate(&self) -> Result<()> {
        let grants = match self.bridge.request_permissions(&REQUIRED_PERMISSIONS).await {
            Ok(grants) => grants,
            Err(e) => {
                error!(error = %e, "permission request failed");
                return Err(e);
            }
        };

        let denied = grants.denied(&REQUIRED_PERMISSIONS);
        if denied.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = denied.iter().map(|p| p.android_name().to_owned()).collect();
        warn!(denied = ?names, "discovery blocked by missing permissions");
        let err = ZebraPrintError::PermissionDenied(names);
        if self.config.notify_permission_denied {
            self.ui.notify(&err.to_string());
        }
        Err(err)
    }

    fn report_print(&self, address: &str, printed: Result<()>) -> Result<PrintOutcome> {
        match printed {
            Ok(()) => {
                info!(address, "print finished");
                if self.config.notify_print_success {
                    self.ui.notify("Print finished");
                }
                Ok(PrintOutcome::Printed)
            }
            Err(e) => {
                error!(address, error = %e, "print failed");
                self.ui.notify(&e.to_string());
                Err(e)
            }
        }
    }
}

/// A running operation. Dropping it returns the screen to idle, including
/// when the awaiting future itself is dropped.
struct Operation<'a, B: PlatformBridge, U: ScreenUi> {
    inner: &'a Inner<B, U>,
}

impl<B: PlatformBridge, U: ScreenUi> Operation<'_, B, U> {
    fn advance(&self, phase: Phase) {
        self.inner.update(|state| state.advance(phase));
    }
}

impl<B: PlatformBridge, U: ScreenUi> Drop for Operation<'_, B, U> {
    fn drop(&mut self) {
        self.inner.update(ScreenState::finish);
    }
}

/// Bound a native call. The native side is not cancelled; its late result
/// is discarded.
async fn timed<T>(
    limit: Duration,
    operation: &'static str,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ZebraPrintError::Timeout {
            operation,
            after_ms: limit.as_millis() as u64,
        })?
}
