// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printers page — discovery trigger and the tappable printer list.

use dioxus::prelude::*;

use zebraprint_core::types::DiscoveredPrinter;

use crate::pages::overlays::{AcknowledgeDialog, ConfirmDialog, Spinner, ToastStack};
use crate::services::ui_surface::{AppScreen, SignalUi};
use crate::state::Phase;

#[component]
pub fn Printers() -> Element {
    let screen = use_context::<AppScreen>();
    let ui = use_context::<SignalUi>();
    let state = ui.screen.read().clone();
    let idle = state.phase == Phase::Idle;

    rsx! {
        div {
            style: "display: flex; flex-direction: column; min-height: 100vh; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",

            h1 { style: "font-size: 22px; margin: 8px 0 16px;", "Zebra Printers" }

            button {
                style: "padding: 14px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                disabled: !idle,
                onclick: move |_| {
                    let screen = screen.clone();
                    spawn(async move {
                        if let Err(e) = screen.discover().await {
                            tracing::debug!(error = %e, "discovery ended without a list");
                        }
                    });
                },
                "Discover Printers"
            }

            if state.busy() {
                Spinner {}
            }

            div { style: "margin-top: 16px;",
                for printer in state.printers.iter() {
                    PrinterCard { key: "{printer.address}", printer: printer.clone() }
                }
            }

            ConfirmDialog {}
            AcknowledgeDialog {}
            ToastStack {}
        }
    }
}

#[component]
fn PrinterCard(printer: DiscoveredPrinter) -> Element {
    let screen = use_context::<AppScreen>();
    let address = printer.address.clone();
    let label_screen = screen.clone();
    let label_address = printer.address.clone();

    rsx! {
        div {
            style: "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px; cursor: pointer; display: flex; justify-content: space-between; align-items: center;",
            onclick: move |_| {
                let screen = screen.clone();
                let address = address.clone();
                tracing::info!(address = %address, "printer tapped");
                spawn(async move {
                    if let Err(e) = screen.print_to(&address).await {
                        tracing::debug!(error = %e, "print ended with error");
                    }
                });
            },
            div {
                strong { "{printer.name}" }
                p { style: "color: #666; font-size: 14px; margin: 4px 0 0;", "{printer.address}" }
            }
            button {
                style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                onclick: move |evt| {
                    evt.stop_propagation();
                    let screen = label_screen.clone();
                    let address = label_address.clone();
                    spawn(async move {
                        if let Err(e) = screen.print_test_label(&address).await {
                            tracing::debug!(error = %e, "test label ended with error");
                        }
                    });
                },
                "Test label"
            }
        }
    }
}
