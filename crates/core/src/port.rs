// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Port Context — the shared per-port variables referenced by every
//! machine on a port (spec.md §3, §4.C).
//!
//! Each field is annotated with the single machine that writes it; every
//! other machine may only read it (spec.md §5 "Shared-resource policy").
//! Rust requires synchronizing access regardless of that logical partition
//! because each machine runs on its own task — callers hold a
//! `parking_lot::Mutex<PortContext>` (see `l2fsm-engine::port::Port`) and
//! lock it for the duration of a single action.

use crate::ppmm::PpmmEvent;
use crate::timer::EdgeDelayWhileTimer;
use tokio::sync::mpsc;

/// Identifies a logical bridge port (an ifindex, in the original source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u32);

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variables shared by every state machine running on one port.
///
/// Field ownership (spec.md §4.C):
/// - `port_enabled` — owned by the link-status collaborator, external.
/// - `rcvd_bpdu`, `rcvd_rstp`, `rcvd_stp`, `rcvd_msg`, `bpdu_rx` — owned by PRX.
/// - `oper_edge` — owned by BDM.
/// - `admin_edge`, `auto_edge_port` — administrative, set at port admit.
/// - `send_rstp`, `proposing` — owned by machines out of scope here (Port
///   Protocol Migration / Port Transmit); PRX and BDM only read them.
/// - `edge_delay_while_timer` — owned by the timer machine, out of scope
///   here; PRX resets it on entering Discard/Receive (spec.md §4.D), BDM
///   only reads it.
/// - `bridge_protocol_version` — owned by the bridge-wide protocol
///   migration collaborator.
pub struct PortContext {
    pub id: PortId,

    pub port_enabled: bool,

    pub rcvd_bpdu: bool,
    pub rcvd_rstp: bool,
    pub rcvd_stp: bool,
    pub rcvd_msg: bool,
    pub bpdu_rx: u64,

    pub oper_edge: bool,
    pub admin_edge: bool,
    pub auto_edge_port: bool,

    pub send_rstp: bool,
    pub proposing: bool,

    pub edge_delay_while_timer: EdgeDelayWhileTimer,
    pub bridge_protocol_version: u8,

    /// Handle to PPMM's inbound queue. `None` until PPMM has been
    /// constructed for this port (spec.md §3 "Lifecycles"); PRX must
    /// tolerate its absence (spec.md §7 "Peer-machine queue absent").
    pub ppmm_tx: Option<mpsc::Sender<PpmmEvent>>,

    /// Observer invoked by BDM with `(old, new)` after `oper_edge` commits
    /// (spec.md §4.E). `None` if nobody is watching.
    #[allow(clippy::type_complexity)]
    pub oper_edge_observer: Option<Box<dyn Fn(bool, bool) + Send>>,
}

impl PortContext {
    pub fn new(id: PortId) -> Self {
        Self {
            id,
            port_enabled: false,
            rcvd_bpdu: false,
            rcvd_rstp: false,
            rcvd_stp: false,
            rcvd_msg: false,
            bpdu_rx: 0,
            oper_edge: false,
            admin_edge: false,
            auto_edge_port: false,
            send_rstp: false,
            proposing: false,
            edge_delay_while_timer: EdgeDelayWhileTimer::new(crate::timer::MIGRATE_TIME_DEFAULT),
            bridge_protocol_version: 2,
            ppmm_tx: None,
            oper_edge_observer: None,
        }
    }

    /// Post an event to PPMM if its queue handle is present; otherwise a
    /// no-op (spec.md §7 — the predicate re-fires on the next BPDU).
    pub fn notify_ppmm(&self, event: PpmmEvent) {
        if let Some(tx) = &self.ppmm_tx {
            // `try_send`: PPMM's queue is bounded and posting here must not
            // block the caller's driver task (spec.md §5 "Actions do not
            // suspend"). A full PPMM queue drops the notification; the
            // underlying predicate is level-triggered and will re-fire on
            // the next qualifying BPDU, so this is not data loss per §7.
            if tx.try_send(event).is_err() {
                tracing::warn!(port = %self.id, ?event, "PPMM queue full or closed, dropping notification");
            }
        }
    }

    /// Invoke the OperEdge-change observer, if any (spec.md §4.E, §8).
    pub fn notify_oper_edge_changed(&self, old: bool, new: bool) {
        if let Some(observer) = &self.oper_edge_observer {
            observer(old, new);
        }
    }
}

// Manual impl: `oper_edge_observer` is a boxed closure and doesn't
// implement `Debug` on its own (same reason `envelope::MachineEvent` has a
// manual impl for its response channel).
impl std::fmt::Debug for PortContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortContext")
            .field("id", &self.id)
            .field("port_enabled", &self.port_enabled)
            .field("rcvd_bpdu", &self.rcvd_bpdu)
            .field("rcvd_rstp", &self.rcvd_rstp)
            .field("rcvd_stp", &self.rcvd_stp)
            .field("rcvd_msg", &self.rcvd_msg)
            .field("bpdu_rx", &self.bpdu_rx)
            .field("oper_edge", &self.oper_edge)
            .field("admin_edge", &self.admin_edge)
            .field("auto_edge_port", &self.auto_edge_port)
            .field("send_rstp", &self.send_rstp)
            .field("proposing", &self.proposing)
            .field("edge_delay_while_timer", &self.edge_delay_while_timer)
            .field("bridge_protocol_version", &self.bridge_protocol_version)
            .field("ppmm_tx", &self.ppmm_tx)
            .field("has_oper_edge_observer", &self.oper_edge_observer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
