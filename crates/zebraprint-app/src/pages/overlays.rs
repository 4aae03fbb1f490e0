// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spinner, dialogs and notifications drawn over the printers page.

use dioxus::prelude::*;

use crate::services::ui_surface::{PendingPrompt, SignalUi};

const BACKDROP: &str = "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; align-items: center; justify-content: center;";
const CARD: &str = "background: white; border-radius: 12px; padding: 20px; width: 80%; max-width: 360px;";

#[component]
pub fn Spinner() -> Element {
    rsx! {
        style { "@keyframes zebraprint-spin {{ to {{ transform: rotate(360deg); }} }}" }
        div { style: "display: flex; justify-content: center; margin: 16px 0;",
            div { style: "width: 32px; height: 32px; border: 4px solid #e0e0e0; border-top-color: #007aff; border-radius: 50%; animation: zebraprint-spin 0.8s linear infinite;" }
        }
    }
}

fn resolve(mut slot: Signal<Option<PendingPrompt>>, confirmed: bool) {
    if let Some(pending) = slot.write().take() {
        pending.answer(confirmed);
    }
}

/// Two-action confirmation. Each tap resolves the pending prompt once.
#[component]
pub fn ConfirmDialog() -> Element {
    let ui = use_context::<SignalUi>();
    let slot = ui.prompt;
    let Some(prompt) = slot.read().as_ref().map(|p| p.prompt.clone()) else {
        return rsx! {};
    };

    rsx! {
        div { style: BACKDROP,
            div { style: CARD,
                h3 { style: "margin: 0 0 8px;", "{prompt.title}" }
                p { style: "color: #333;", "{prompt.message}" }
                div { style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| resolve(slot, false),
                        "{prompt.cancel_label}"
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: none; background: #007aff; color: white;",
                        onclick: move |_| resolve(slot, true),
                        "{prompt.confirm_label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn AcknowledgeDialog() -> Element {
    let ui = use_context::<SignalUi>();
    let mut acknowledgement = ui.acknowledgement;
    let Some(message) = acknowledgement.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div { style: BACKDROP,
            div { style: CARD,
                p { style: "color: #333;", "{message}" }
                div { style: "display: flex; justify-content: flex-end; margin-top: 16px;",
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: none; background: #007aff; color: white;",
                        onclick: move |_| acknowledgement.set(None),
                        "OK"
                    }
                }
            }
        }
    }
}

/// Notifications, oldest on top. Each one removes itself after the
/// configured duration.
#[component]
pub fn ToastStack() -> Element {
    let ui = use_context::<SignalUi>();
    let toasts = ui.toasts;

    rsx! {
        div { style: "position: fixed; left: 16px; right: 16px; bottom: 24px; display: flex; flex-direction: column; gap: 8px; pointer-events: none;",
            for toast in toasts.read().iter() {
                {
                    let shown = toast.shown_at.format("%H:%M:%S").to_string();
                    rsx! {
                        div {
                            key: "{toast.id}",
                            title: "{shown}",
                            style: "padding: 10px 14px; border-radius: 8px; background: rgba(40, 40, 40, 0.9); color: white; font-size: 14px; text-align: center;",
                            "{toast.message}"
                        }
                    }
                }
            }
        }
    }
}
