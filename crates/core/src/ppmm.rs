// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cross-notification contract PRX uses to talk to the Port Protocol
//! Migration Machine (PPMM).
//!
//! PPMM itself is an external collaborator (spec.md §1 — "named but not
//! specified"); this module only defines the two event variants PRX is
//! specified to post to it (spec.md §4.D `UpdtBPDUVersion`), so that a port
//! wiring PRX to a real PPMM implementation has a concrete type to route on.

/// Events PRX posts to PPMM's inbound queue when it observes a BPDU-version
/// transition while classifying an incoming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PpmmEvent {
    /// An RSTP BPDU arrived while this port was not yet flagged `RcvdRSTP`,
    /// was not sending RSTP, and the bridge's protocol version is RSTP.
    RstpVersionAndNotSendRSTPAndRcvdRSTP,
    /// An STP (or Topology Change) BPDU arrived while this port was
    /// sending RSTP.
    SendRSTPAndRcvdSTP,
}

crate::simple_display! {
    PpmmEvent {
        RstpVersionAndNotSendRSTPAndRcvdRSTP => "RstpVersionAndNotSendRSTPAndRcvdRSTP",
        SendRSTPAndRcvdSTP => "SendRSTPAndRcvdSTP",
    }
}
