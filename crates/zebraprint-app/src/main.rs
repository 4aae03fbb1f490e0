// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zebraprint — Bluetooth label printer discovery and PDF printing
//
// Entry point. Initialises logging, loads the config, wires the platform
// bridge to the screen controller, and launches the Dioxus UI.

mod pages;
mod screen;
mod services;
mod state;

use dioxus::prelude::*;

use pages::printers::Printers;
use screen::PrinterScreen;
use services::config_store;
use services::data_dir::data_dir;
use services::ui_surface::{AppScreen, SignalUi};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Zebraprint starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let config = use_hook(|| config_store::load_or_init(&data_dir()));
    let ui = use_hook(|| SignalUi::new(config.toast_duration()));
    let screen: AppScreen = use_hook(|| {
        let bridge = zebraprint_bridge::platform_bridge(&config);
        PrinterScreen::new(bridge, ui, config.clone())
    });

    use_context_provider(|| ui);
    use_context_provider(|| screen.clone());

    rsx! {
        Printers {}
    }
}
