// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn admit_then_withdraw_round_trips() {
    let mut port = Port::new(PortId(42));
    assert!(!port.is_admitted());

    port.admit().await.unwrap();
    assert!(port.is_admitted());
    assert!(port.prx().is_some());
    assert!(port.bdm().is_some());

    port.withdraw().await.unwrap();
    assert!(!port.is_admitted());
}

#[tokio::test]
async fn double_admit_is_rejected() {
    let mut port = Port::new(PortId(1));
    port.admit().await.unwrap();
    assert!(matches!(port.admit().await, Err(EngineError::AlreadyAdmitted)));
    port.withdraw().await.unwrap();
}

#[tokio::test]
async fn withdraw_before_admit_is_rejected() {
    let mut port = Port::new(PortId(1));
    assert!(matches!(port.withdraw().await, Err(EngineError::NotAdmitted)));
}

#[tokio::test]
async fn admit_delivers_begin_admin_edge_variant_from_configured_context() {
    let mut port = Port::new(PortId(9));
    port.context.lock().admin_edge = true;

    port.admit().await.unwrap();

    // BDM's Begin action sets oper_edge in lock-step with the variant it
    // receives; admit() already waited for both Begin events to be
    // acknowledged, so this observes that `admin_edge` at admit time
    // selected `BeginAdminEdge` without reaching into BDM's private state.
    assert!(port.context.lock().oper_edge);

    port.withdraw().await.unwrap();
}

#[tokio::test]
async fn raw_frame_delivered_through_the_port_updates_bpdu_rx() {
    let mut port = Port::new(PortId(2));
    port.context.lock().port_enabled = true;
    port.admit().await.unwrap();

    let raw = vec![0x42, 0x42, 0x03, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00];
    let (resp_tx, resp_rx) = tokio::sync::oneshot::channel();
    let mut pdu = prx::RxBpduPdu::new(raw, "test");
    pdu.response = Some(resp_tx);
    port.prx().unwrap().rx_bpdu.send(pdu).await.unwrap();
    resp_rx.await.unwrap();

    assert_eq!(port.context.lock().bpdu_rx, 1);

    port.withdraw().await.unwrap();
}
