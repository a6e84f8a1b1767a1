// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PRX — the Port Receive state machine (spec.md §4.D; 802.1D §17.23).
//!
//! PRX owns `rcvd_bpdu`, `rcvd_rstp`, `rcvd_stp`, `rcvd_msg` and `bpdu_rx` on
//! the port's `PortContext`, classifies raw frames arriving on its typed
//! `rx_bpdu` queue, and cross-notifies PPMM when a BPDU's encoded version
//! disagrees with what the port has seen so far (`UpdtBPDUVersion`,
//! `lacp/protocol/system.go`'s STP sibling `stp/protocol/portrcvfsm.go`).

use l2fsm_core::{Machine, MachineEvent, PortContext, PpmmEvent, Ruleset};
use l2fsm_wire::{classify, ClassifiedFrame, PduType};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::EngineError;

pub const MODULE_NAME: &str = "Port Receive State Machine";

/// Bound on PRX's generic event queue (`PrxmEvents` in the original source).
const EVENTS_CAPACITY: usize = 10;
/// Bound on PRX's raw-frame queue (`PrxmRxBpduPkt` in the original source).
const RX_BPDU_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrxState {
    None,
    Discard,
    Receive,
}

l2fsm_core::simple_display! {
    PrxState {
        None => "PRX_NONE",
        Discard => "PRX_DISCARD",
        Receive => "PRX_RECEIVE",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrxEvent {
    Begin,
    RcvdBpduAndNotPortEnabled,
    EdgeDelayWhileNotEqualMigrateTimeAndNotPortEnabled,
    RcvdBpduAndPortEnabled,
    RcvdBpduAndPortEnabledAndNotRcvdMsg,
}

l2fsm_core::simple_display! {
    PrxEvent {
        Begin => "Begin",
        RcvdBpduAndNotPortEnabled => "RcvdBpduAndNotPortEnabled",
        EdgeDelayWhileNotEqualMigrateTimeAndNotPortEnabled =>
            "EdgeDelayWhileNotEqualMigrateTimeAndNotPortEnabled",
        RcvdBpduAndPortEnabled => "RcvdBpduAndPortEnabled",
        RcvdBpduAndPortEnabledAndNotRcvdMsg => "RcvdBpduAndPortEnabledAndNotRcvdMsg",
    }
}

/// A raw frame posted to PRX's typed `rx_bpdu` queue (spec.md §4.B, §4.D).
pub struct RxBpduPdu {
    pub raw: Vec<u8>,
    pub source: Cow<'static, str>,
    pub response: Option<oneshot::Sender<&'static str>>,
}

impl RxBpduPdu {
    pub fn new(raw: Vec<u8>, source: impl Into<Cow<'static, str>>) -> Self {
        Self { raw, source: source.into(), response: None }
    }
}

fn enter_discard(ctx: &mut PortContext, _payload: Option<&ClassifiedFrame>) -> PrxState {
    ctx.rcvd_bpdu = false;
    ctx.rcvd_rstp = false;
    ctx.rcvd_stp = false;
    ctx.rcvd_msg = false;
    ctx.edge_delay_while_timer.reset_to_migrate_time();
    PrxState::Discard
}

fn enter_receive(ctx: &mut PortContext, payload: Option<&ClassifiedFrame>) -> PrxState {
    ctx.rcvd_msg = payload.map(|frame| updt_bpdu_version(ctx, frame)).unwrap_or(false);
    ctx.rcvd_bpdu = false;
    ctx.oper_edge = false;
    ctx.edge_delay_while_timer.reset_to_migrate_time();
    PrxState::Receive
}

/// `UpdtBPDUVersion`: re-validate the classified frame against the port's
/// accumulated state, cross-notifying PPMM on a version transition
/// (spec.md §4.D). Returns whether the frame updated `rcvd_msg`.
fn updt_bpdu_version(ctx: &mut PortContext, frame: &ClassifiedFrame) -> bool {
    match frame.pdu_type {
        PduType::Rstp => {
            if !ctx.rcvd_rstp && !ctx.send_rstp && ctx.bridge_protocol_version == l2fsm_wire::RSTP_VERSION
            {
                ctx.notify_ppmm(PpmmEvent::RstpVersionAndNotSendRSTPAndRcvdRSTP);
            }
            ctx.rcvd_rstp = true;
            true
        }
        PduType::Stp | PduType::Topo => {
            if ctx.send_rstp {
                ctx.notify_ppmm(PpmmEvent::SendRSTPAndRcvdSTP);
            }
            ctx.rcvd_stp = true;
            true
        }
        PduType::Unknown => false,
    }
}

fn build_ruleset() -> Ruleset<PrxState, PrxEvent, PortContext, ClassifiedFrame> {
    let mut rules = Ruleset::new();
    for state in [PrxState::None, PrxState::Discard, PrxState::Receive] {
        rules.add_rule(state, PrxEvent::Begin, enter_discard);
    }
    rules.add_rule(PrxState::Discard, PrxEvent::RcvdBpduAndNotPortEnabled, enter_discard);
    rules.add_rule(PrxState::Receive, PrxEvent::RcvdBpduAndNotPortEnabled, enter_discard);
    rules.add_rule(
        PrxState::Discard,
        PrxEvent::EdgeDelayWhileNotEqualMigrateTimeAndNotPortEnabled,
        enter_discard,
    );
    rules.add_rule(
        PrxState::Receive,
        PrxEvent::EdgeDelayWhileNotEqualMigrateTimeAndNotPortEnabled,
        enter_discard,
    );
    rules.add_rule(PrxState::Discard, PrxEvent::RcvdBpduAndPortEnabled, enter_receive);
    rules.add_rule(PrxState::Receive, PrxEvent::RcvdBpduAndPortEnabled, enter_receive);
    rules.add_rule(PrxState::Discard, PrxEvent::RcvdBpduAndPortEnabledAndNotRcvdMsg, enter_receive);
    rules
}

/// Re-entrant post-state check (spec.md §9 "REDESIGN FLAGS" — a direct
/// second `process_event` call, bounded to depth 1, never a re-enqueue).
fn post_state_hook(
    machine: &mut Machine<PrxState, PrxEvent, PortContext, ClassifiedFrame>,
    ctx: &mut PortContext,
) {
    if machine.current_state() == PrxState::Receive && ctx.rcvd_msg {
        let _ = machine.process_event(
            ctx,
            MODULE_NAME,
            PrxEvent::RcvdBpduAndPortEnabledAndNotRcvdMsg,
            None,
        );
    }
}

/// Caller-facing handle: the two inbound queues, the kill switch, and the
/// log-enable toggle (spec.md §4.B).
pub struct PrxHandle {
    pub events: mpsc::Sender<MachineEvent<PrxEvent, ClassifiedFrame>>,
    pub rx_bpdu: mpsc::Sender<RxBpduPdu>,
    kill: Option<oneshot::Sender<()>>,
    log_enabled: Arc<AtomicBool>,
}

impl PrxHandle {
    pub fn set_log_enabled(&self, enabled: bool) {
        self.log_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Send the kill signal. The caller must await the paired `JoinHandle`
    /// before dropping this handle, so the queues stay open until the
    /// driver task has actually stopped reading them (spec.md §5).
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

pub fn spawn(port: Arc<Mutex<PortContext>>) -> (PrxHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::channel(EVENTS_CAPACITY);
    let (rx_bpdu_tx, rx_bpdu_rx) = mpsc::channel(RX_BPDU_CAPACITY);
    let (kill_tx, kill_rx) = oneshot::channel();

    let machine = Machine::new(build_ruleset(), PrxState::None, MODULE_NAME);
    let log_enabled = machine.log_enabled_handle();

    let join = tokio::spawn(run(machine, port, events_rx, rx_bpdu_rx, kill_rx));

    (PrxHandle { events: events_tx, rx_bpdu: rx_bpdu_tx, kill: Some(kill_tx), log_enabled }, join)
}

async fn run(
    mut machine: Machine<PrxState, PrxEvent, PortContext, ClassifiedFrame>,
    port: Arc<Mutex<PortContext>>,
    mut events: mpsc::Receiver<MachineEvent<PrxEvent, ClassifiedFrame>>,
    mut rx_bpdu: mpsc::Receiver<RxBpduPdu>,
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
                    if machine.process_event(&mut ctx, &ev.source, ev.event, ev.payload.as_ref()).is_ok() {
                        post_state_hook(&mut machine, &mut ctx);
                    }
                }
                ev.ack(MODULE_NAME);
            }
            maybe_rx = rx_bpdu.recv() => {
                let Some(rx) = maybe_rx else { break };
                let classified = classify(&rx.raw);
                {
                    let mut ctx = port.lock();
                    ctx.bpdu_rx += 1;
                    let event = if ctx.port_enabled {
                        PrxEvent::RcvdBpduAndPortEnabled
                    } else {
                        PrxEvent::RcvdBpduAndNotPortEnabled
                    };
                    if machine.process_event(&mut ctx, &rx.source, event, Some(&classified)).is_ok() {
                        post_state_hook(&mut machine, &mut ctx);
                    }
                }
                if let Some(resp) = rx.response {
                    let _ = resp.send(MODULE_NAME);
                }
            }
        }
    }
    tracing::debug!(machine = MODULE_NAME, "harness end");
}

#[cfg(test)]
#[path = "prx_tests.rs"]
mod tests;
