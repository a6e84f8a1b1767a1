// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `MachineEvent` — the envelope posted onto a machine's inbound queue
//! (spec.md §4.H, Component H "Event bus glue").

use tokio::sync::oneshot;

/// An event posted onto a machine's inbound queue.
///
/// `source` is a human-readable producer tag used exclusively for error
/// messages (spec.md §4.H) — never parsed, never matched on.
///
/// `response`, when set, MUST receive the target module's name exactly once
/// after the event (and its post-state hook) has been fully processed.
/// Callers that set it block until acknowledged; callers that omit it are
/// fire-and-forget.
pub struct MachineEvent<E, P = ()> {
    pub source: String,
    pub event: E,
    pub payload: Option<P>,
    pub response: Option<oneshot::Sender<&'static str>>,
}

impl<E, P> MachineEvent<E, P> {
    /// Fire-and-forget event with no payload and no ack.
    pub fn new(source: impl Into<String>, event: E) -> Self {
        Self { source: source.into(), event, payload: None, response: None }
    }

    pub fn with_payload(source: impl Into<String>, event: E, payload: P) -> Self {
        Self { source: source.into(), event, payload: Some(payload), response: None }
    }

    /// Attach a response channel; the caller should await `rx` for the ack.
    pub fn with_response(mut self) -> (Self, oneshot::Receiver<&'static str>) {
        let (tx, rx) = oneshot::channel();
        self.response = Some(tx);
        (self, rx)
    }

    /// Send the ack, if the caller asked for one. A caller that dropped the
    /// receiver (e.g. it gave up waiting) is not an error.
    pub fn ack(&mut self, module_name: &'static str) {
        if let Some(tx) = self.response.take() {
            let _ = tx.send(module_name);
        }
    }
}

impl<E: std::fmt::Debug, P> std::fmt::Debug for MachineEvent<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineEvent")
            .field("source", &self.source)
            .field("event", &self.event)
            .field("has_payload", &self.payload.is_some())
            .field("has_response", &self.response.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
