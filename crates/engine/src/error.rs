// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors the Machine Harness and `Port` can raise (spec.md §5, §7).
//!
//! `FsmError` (rule violations) is deliberately not part of this enum: a
//! missing rule is logged and the machine keeps running (spec.md §7), it
//! never propagates to a caller.

/// Conditions that are genuine programming errors, not self-healing rule
/// gaps — spec.md §5 "Sending to a closed queue, or killing a Harness
/// twice, is a bug in the caller, not a condition the Harness papers over".
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("harness already killed")]
    DoubleKill,

    #[error("port already admitted")]
    AlreadyAdmitted,

    #[error("port not admitted")]
    NotAdmitted,

    #[error("send to a closed machine queue")]
    SendAfterClose,
}
