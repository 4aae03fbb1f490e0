// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dioxus implementation of `ScreenUi`.
//
// The controller never touches components. It writes to the signals held
// here and the pages render whatever they contain.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use tokio::sync::oneshot;
use uuid::Uuid;

use zebraprint_bridge::DefaultBridge;

use crate::screen::{ConfirmPrompt, PrinterScreen, ScreenUi};
use crate::state::ScreenState;

/// The controller the pages get from context.
pub type AppScreen = PrinterScreen<DefaultBridge, SignalUi>;

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.to_owned(),
            shown_at: Utc::now(),
        }
    }
}

/// A confirmation dialog waiting for the user.
#[derive(Debug)]
pub struct PendingPrompt {
    pub prompt: ConfirmPrompt,
    reply: oneshot::Sender<bool>,
}

impl PendingPrompt {
    /// Resolve the dialog. The controller may have given up already.
    pub fn answer(self, confirmed: bool) {
        if self.reply.send(confirmed).is_err() {
            tracing::debug!("confirmation answered after the print flow ended");
        }
    }
}

#[derive(Clone, Copy)]
pub struct SignalUi {
    pub screen: Signal<ScreenState>,
    pub toasts: Signal<Vec<Toast>>,
    pub prompt: Signal<Option<PendingPrompt>>,
    pub acknowledgement: Signal<Option<String>>,
    toast_duration: Duration,
}

impl SignalUi {
    /// Create the signals. Call from a component body, once.
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            screen: Signal::new(ScreenState::default()),
            toasts: Signal::new(Vec::new()),
            prompt: Signal::new(None),
            acknowledgement: Signal::new(None),
            toast_duration,
        }
    }
}

impl ScreenUi for SignalUi {
    fn render(&self, state: &ScreenState) {
        let mut screen = self.screen;
        screen.set(state.clone());
    }

    fn notify(&self, message: &str) {
        let toast = Toast::new(message);
        let id = toast.id;
        let mut toasts = self.toasts;
        toasts.write().push(toast);

        let duration = self.toast_duration;
        spawn(async move {
            tokio::time::sleep(duration).await;
            toasts.write().retain(|t| t.id != id);
        });
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        let (reply, answer) = oneshot::channel();
        let mut slot = self.prompt;
        if let Some(stale) = slot.write().replace(PendingPrompt { prompt, reply }) {
            stale.answer(false);
        }
        // a dialog torn down without an answer counts as cancel
        answer.await.unwrap_or(false)
    }

    fn acknowledge(&self, message: &str) {
        let mut acknowledgement = self.acknowledgement;
        acknowledgement.set(Some(message.to_owned()));
    }
}
