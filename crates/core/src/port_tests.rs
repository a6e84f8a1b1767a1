// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use std::sync::Arc;

#[test]
fn new_port_context_has_discard_defaults() {
    let ctx = PortContext::new(PortId(1));
    assert!(!ctx.port_enabled);
    assert!(!ctx.rcvd_bpdu);
    assert_eq!(ctx.bpdu_rx, 0);
    assert_eq!(ctx.edge_delay_while_timer.count, 3);
    assert!(ctx.ppmm_tx.is_none());
}

#[test]
fn notify_ppmm_without_handle_is_noop() {
    let ctx = PortContext::new(PortId(1));
    // Must not panic when PPMM hasn't been constructed yet (spec §3, §7).
    ctx.notify_ppmm(PpmmEvent::SendRSTPAndRcvdSTP);
}

#[test]
fn notify_ppmm_with_handle_delivers() {
    let mut ctx = PortContext::new(PortId(1));
    let (tx, mut rx) = mpsc::channel(4);
    ctx.ppmm_tx = Some(tx);
    ctx.notify_ppmm(PpmmEvent::RstpVersionAndNotSendRSTPAndRcvdRSTP);
    assert_eq!(rx.try_recv().unwrap(), PpmmEvent::RstpVersionAndNotSendRSTPAndRcvdRSTP);
}

#[test]
fn oper_edge_observer_receives_old_and_new() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = seen.clone();
    let mut ctx = PortContext::new(PortId(7));
    ctx.oper_edge_observer = Some(Box::new(move |old, new| seen2.lock().push((old, new))));
    ctx.notify_oper_edge_changed(false, true);
    assert_eq!(*seen.lock(), vec![(false, true)]);
}

#[test]
fn port_id_display() {
    assert_eq!(PortId(42).to_string(), "42");
}
