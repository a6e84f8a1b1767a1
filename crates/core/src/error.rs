// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FSM kernel errors.

use std::fmt::Debug;

/// A rule violation: no action registered for `(state, event)`.
///
/// Per spec §7 this is not fatal — the caller logs it at `ERROR` and leaves
/// the machine's state unchanged. `source` is the human-readable producer
/// tag carried on the `MachineEvent` that triggered the lookup.
#[derive(Debug, Clone, thiserror::Error)]
#[error("rule violation: no action for state {state:?} on event {event:?} (source: {source_tag})")]
pub struct FsmError<S: Debug, E: Debug> {
    pub source_tag: String,
    pub state: S,
    pub event: E,
}

impl<S: Debug, E: Debug> FsmError<S, E> {
    pub fn new(source_tag: impl Into<String>, state: S, event: E) -> Self {
        Self { source_tag: source_tag.into(), state, event }
    }

    pub fn source(&self) -> &str {
        &self.source_tag
    }
}
