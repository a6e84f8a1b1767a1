// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn llc_frame(rest: &[u8]) -> Vec<u8> {
    let mut frame = vec![LLC_DSAP, LLC_SSAP, LLC_CONTROL];
    frame.extend_from_slice(rest);
    frame
}

#[test]
fn classifies_rstp() {
    let frame = llc_frame(&[0x00, 0x00, RSTP_VERSION, BPDU_TYPE_RSTP, 0, 0]);
    let c = classify(&frame);
    assert_eq!(c.pdu_type, PduType::Rstp);
    assert_eq!(c.protocol_version_id, RSTP_VERSION);
    assert_eq!(c.bpdu_type, BPDU_TYPE_RSTP);
}

#[test]
fn classifies_stp_config() {
    let frame = llc_frame(&[0x00, 0x00, STP_VERSION, BPDU_TYPE_STP_CONFIG]);
    assert_eq!(classify(&frame).pdu_type, PduType::Stp);
}

#[test]
fn classifies_stp_topology_change_as_topo() {
    let frame = llc_frame(&[0x00, 0x00, STP_VERSION, BPDU_TYPE_TOPOLOGY_CHANGE]);
    assert_eq!(classify(&frame).pdu_type, PduType::Topo);
}

#[test]
fn classifies_tcn_as_topo() {
    let frame = llc_frame(&[0x00, 0x00, TCN_VERSION, BPDU_TYPE_TOPOLOGY_CHANGE]);
    assert_eq!(classify(&frame).pdu_type, PduType::Topo);
}

#[test]
fn unknown_on_wrong_llc_header() {
    let frame = vec![0xAA, 0xAA, 0x03, 0x00, 0x00, RSTP_VERSION, BPDU_TYPE_RSTP];
    assert_eq!(classify(&frame).pdu_type, PduType::Unknown);
}

#[test]
fn unknown_on_short_frame() {
    assert_eq!(classify(&[]).pdu_type, PduType::Unknown);
    assert_eq!(classify(&llc_frame(&[0x00])).pdu_type, PduType::Unknown);
}

#[test]
fn unknown_on_unrecognized_version_type_pair() {
    let frame = llc_frame(&[0x00, 0x00, 0x07, 0x09]);
    assert_eq!(classify(&frame).pdu_type, PduType::Unknown);
}

proptest! {
    #[test]
    fn classify_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = classify(&bytes);
    }
}

#[yare::parameterized(
    rstp = (RSTP_VERSION, BPDU_TYPE_RSTP, PduType::Rstp),
    stp_config = (STP_VERSION, BPDU_TYPE_STP_CONFIG, PduType::Stp),
    stp_topology_change = (STP_VERSION, BPDU_TYPE_TOPOLOGY_CHANGE, PduType::Topo),
    garbage_version = (0x05, 0x05, PduType::Unknown),
)]
fn version_type_pair_classifies_as(version: u8, bpdu_type: u8, expected: PduType) {
    let frame = llc_frame(&[0x00, 0x00, version, bpdu_type]);
    assert_eq!(classify(&frame).pdu_type, expected);
}
