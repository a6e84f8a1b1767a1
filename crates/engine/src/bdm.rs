// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BDM — the Bridge Detection state machine (spec.md §4.E; 802.1D §17.24).
//!
//! BDM owns `oper_edge` on the port's `PortContext`. Unlike PRX it has no
//! typed input queue of its own — every event, including the two it posts to
//! itself via the post-state hook, arrives on the generic `events` queue
//! (`stp/protocol/bdmfsm.go`'s `ProcessPostStateEdge` / `ProcessPostStateNotEdge`).

use l2fsm_core::{Machine, MachineEvent, PortContext, Ruleset};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::EngineError;

pub const MODULE_NAME: &str = "Bridge Detection State Machine";

/// Bound on BDM's event queue (`BdmEvents` in the original source).
const EVENTS_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BdmState {
    None,
    Edge,
    NotEdge,
}

l2fsm_core::simple_display! {
    BdmState {
        None => "BDM_NONE",
        Edge => "BDM_EDGE",
        NotEdge => "BDM_NOT_EDGE",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BdmEvent {
    BeginAdminEdge,
    BeginNotAdminEdge,
    NotPortEnabledAndAdminEdge,
    EdgeDelayWhileZeroAndAutoEdgeAndSendRSTPAndProposing,
    NotPortEnabledAndNotAdminEdge,
    NotOperEdge,
}

l2fsm_core::simple_display! {
    BdmEvent {
        BeginAdminEdge => "BeginAdminEdge",
        BeginNotAdminEdge => "BeginNotAdminEdge",
        NotPortEnabledAndAdminEdge => "NotPortEnabledAndAdminEdge",
        EdgeDelayWhileZeroAndAutoEdgeAndSendRSTPAndProposing =>
            "EdgeDelayWhileZeroAndAutoEdgeAndSendRSTPAndProposing",
        NotPortEnabledAndNotAdminEdge => "NotPortEnabledAndNotAdminEdge",
        NotOperEdge => "NotOperEdge",
    }
}

fn enter_edge(ctx: &mut PortContext, _payload: Option<&()>) -> BdmState {
    let old = ctx.oper_edge;
    ctx.oper_edge = true;
    ctx.notify_oper_edge_changed(old, true);
    BdmState::Edge
}

fn enter_not_edge(ctx: &mut PortContext, _payload: Option<&()>) -> BdmState {
    let old = ctx.oper_edge;
    ctx.oper_edge = false;
    ctx.notify_oper_edge_changed(old, false);
    BdmState::NotEdge
}

fn build_ruleset() -> Ruleset<BdmState, BdmEvent, PortContext> {
    let mut rules = Ruleset::new();
    for state in [BdmState::None, BdmState::Edge, BdmState::NotEdge] {
        rules.add_rule(state, BdmEvent::BeginAdminEdge, enter_edge);
        rules.add_rule(state, BdmEvent::BeginNotAdminEdge, enter_not_edge);
    }
    rules.add_rule(BdmState::Edge, BdmEvent::NotPortEnabledAndNotAdminEdge, enter_not_edge);
    rules.add_rule(BdmState::Edge, BdmEvent::NotOperEdge, enter_not_edge);
    rules.add_rule(BdmState::NotEdge, BdmEvent::NotPortEnabledAndAdminEdge, enter_edge);
    rules.add_rule(
        BdmState::NotEdge,
        BdmEvent::EdgeDelayWhileZeroAndAutoEdgeAndSendRSTPAndProposing,
        enter_edge,
    );
    rules
}

/// Re-entrant post-state check, mirroring `ProcessPostStateEdge` /
/// `ProcessPostStateNotEdge` in the original source: a direct second
/// `process_event` call bounded to depth 1 (spec.md §9).
fn post_state_hook(machine: &mut Machine<BdmState, BdmEvent, PortContext>, ctx: &mut PortContext) {
    match machine.current_state() {
        BdmState::Edge => {
            if !ctx.oper_edge {
                let _ = machine.process_event(ctx, MODULE_NAME, BdmEvent::NotOperEdge, None);
            }
        }
        BdmState::NotEdge => {
            if ctx.edge_delay_while_timer.is_zero() && ctx.auto_edge_port && ctx.send_rstp && ctx.proposing
            {
                let _ = machine.process_event(
                    ctx,
                    MODULE_NAME,
                    BdmEvent::EdgeDelayWhileZeroAndAutoEdgeAndSendRSTPAndProposing,
                    None,
                );
            }
        }
        BdmState::None => {}
    }
}

pub struct BdmHandle {
    pub events: mpsc::Sender<MachineEvent<BdmEvent>>,
    kill: Option<oneshot::Sender<()>>,
    log_enabled: Arc<AtomicBool>,
}

impl BdmHandle {
    pub fn set_log_enabled(&self, enabled: bool) {
        self.log_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn kill(&mut self) -> Result<(), EngineError> {
        match self.kill.take() {
            Some(tx) => {
                let _ = tx.send(());
                Ok(())
            }
            None => Err(EngineError::DoubleKill),
        }
    }
}

pub fn spawn(port: Arc<Mutex<PortContext>>) -> (BdmHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::channel(EVENTS_CAPACITY);
    let (kill_tx, kill_rx) = oneshot::channel();

    let machine = Machine::new(build_ruleset(), BdmState::None, MODULE_NAME);
    let log_enabled = machine.log_enabled_handle();

    let join = tokio::spawn(run(machine, port, events_rx, kill_rx));

    (BdmHandle { events: events_tx, kill: Some(kill_tx), log_enabled }, join)
}

async fn run(
    mut machine: Machine<BdmState, BdmEvent, PortContext>,
    port: Arc<Mutex<PortContext>>,
    mut events: mpsc::Receiver<MachineEvent<BdmEvent>>,
    mut kill: oneshot::Receiver<()>,
) {
    tracing::debug!(machine = MODULE_NAME, "harness start");
    loop {
        tokio::select! {
            biased;
            _ = &mut kill => break,
            maybe_ev = events.recv() => {
                let Some(mut ev) = maybe_ev else { break };
                {
                    let mut ctx = port.lock();
                    if machine.process_event(&mut ctx, &ev.source, ev.event, None).is_ok() {
                        post_state_hook(&mut machine, &mut ctx);
                    }
                }
                ev.ack(MODULE_NAME);
            }
        }
    }
    tracing::debug!(machine = MODULE_NAME, "harness end");
}

#[cfg(test)]
#[path = "bdm_tests.rs"]
mod tests;
