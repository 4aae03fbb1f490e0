// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native callback → future rendezvous.
//
// Host-side operations (permission prompts, SDK discovery, the document
// picker) report back through a JNI callback on an arbitrary Java thread.
// A `PendingCall` holds the sender half of a oneshot channel between the
// moment Rust starts the operation and the moment the callback fires, so the
// awaiting future resumes exactly once.
//
// The slot stays reserved until the callback arrives, even when the waiter
// has given up. Callbacks carry no call identity, so a late callback could
// otherwise be taken for the answer to a newer call.

use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use zebraprint_core::error::{Result, ZebraPrintError};

/// One outstanding native call of a given kind.
pub struct PendingCall<T> {
    name: &'static str,
    slot: Mutex<Option<oneshot::Sender<T>>>,
}

/// Receiving side returned by [`PendingCall::arm`].
pub struct PendingReply<T> {
    name: &'static str,
    rx: oneshot::Receiver<T>,
}

impl<T> PendingCall<T> {
    /// Usable in a `static`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
        }
    }

    /// Reserve the slot before starting the native operation.
    ///
    /// Fails until the callback of the previous call of the same kind has
    /// arrived, whether or not anyone is still waiting for it.
    pub fn arm(&self) -> Result<PendingReply<T>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ZebraPrintError::Bridge(format!("{} slot poisoned", self.name)))?;

        if let Some(tx) = slot.as_ref() {
            if tx.is_closed() {
                warn!(call = self.name, "previous native call abandoned, still awaiting its callback");
            }
            return Err(ZebraPrintError::Bridge(format!(
                "{} already in flight",
                self.name
            )));
        }

        let (tx, rx) = oneshot::channel();
        *slot = Some(tx);
        debug!(call = self.name, "native call armed");
        Ok(PendingReply {
            name: self.name,
            rx,
        })
    }

    /// Deliver the callback value. Returns false when nothing was waiting.
    pub fn complete(&self, value: T) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };

        match sender {
            Some(tx) => {
                let delivered = tx.send(value).is_ok();
                if !delivered {
                    warn!(call = self.name, "native callback arrived after the caller gave up");
                }
                delivered
            }
            None => {
                warn!(call = self.name, "native callback with no pending call");
                false
            }
        }
    }

    /// Release the slot without delivering, e.g. when starting the native
    /// operation failed synchronously.
    pub fn disarm(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.take();
        }
    }
}

impl<T> PendingReply<T> {
    /// Wait for the native callback.
    pub async fn wait(self) -> Result<T> {
        self.rx.await.map_err(|_| {
            ZebraPrintError::Bridge(format!("{} callback was dropped", self.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DISCOVERY: PendingCall<std::result::Result<String, String>> = PendingCall::new("discovery");

    #[tokio::test]
    async fn callback_resumes_waiter() {
        let call = PendingCall::new("picker");
        let reply = call.arm().unwrap();
        assert!(call.complete(42u32));
        assert_eq!(reply.wait().await.unwrap(), 42);
    }

    #[test]
    fn second_arm_rejected_while_outstanding() {
        let call: PendingCall<()> = PendingCall::new("permissions");
        let _reply = call.arm().unwrap();
        let err = call.arm().err().unwrap();
        assert_eq!(err.to_string(), "platform bridge error: permissions already in flight");
    }

    #[test]
    fn abandoned_slot_held_until_callback() {
        let call: PendingCall<()> = PendingCall::new("permissions");
        drop(call.arm().unwrap());
        assert!(call.arm().is_err());

        assert!(!call.complete(()));
        assert!(call.arm().is_ok());
    }

    #[tokio::test]
    async fn late_callback_never_reaches_next_caller() {
        let call: PendingCall<&'static str> = PendingCall::new("printer discovery");

        // first waiter times out while the native scan keeps running
        drop(call.arm().unwrap());
        let err = call.arm().err().unwrap();
        assert_eq!(err.to_string(), "platform bridge error: printer discovery already in flight");

        // the first scan's callback is discarded and frees the slot
        assert!(!call.complete("result of scan 1"));

        let second = call.arm().unwrap();
        assert!(call.complete("result of scan 2"));
        assert_eq!(second.wait().await.unwrap(), "result of scan 2");
    }

    #[test]
    fn stray_callback_is_ignored() {
        let call: PendingCall<u8> = PendingCall::new("picker");
        assert!(!call.complete(1));
    }

    #[tokio::test]
    async fn disarm_fails_waiter() {
        let call: PendingCall<u8> = PendingCall::new("picker");
        let reply = call.arm().unwrap();
        call.disarm();
        assert!(matches!(reply.wait().await, Err(ZebraPrintError::Bridge(_))));
    }

    #[tokio::test]
    async fn works_from_a_static() {
        let reply = DISCOVERY.arm().unwrap();
        let handle = std::thread::spawn(|| {
            DISCOVERY.complete(Err("Bluetooth disabled".to_string()))
        });
        assert!(handle.join().unwrap());
        assert_eq!(reply.wait().await.unwrap(), Err("Bluetooth disabled".to_string()));
    }
}
