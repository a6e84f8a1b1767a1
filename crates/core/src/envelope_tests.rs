// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DummyEvent;

#[test]
fn fire_and_forget_has_no_response() {
    let ev = MachineEvent::<DummyEvent>::new("test", DummyEvent);
    assert!(ev.response.is_none());
    assert!(ev.payload.is_none());
}

#[test]
fn ack_sends_exactly_once() {
    let (mut ev, rx) = MachineEvent::<DummyEvent>::new("test", DummyEvent).with_response();
    ev.ack("PRX");
    assert_eq!(rx.try_recv().unwrap(), "PRX");
    // Second ack is a no-op, not a panic.
    ev.ack("PRX");
}

#[test]
fn with_payload_carries_it() {
    let ev = MachineEvent::with_payload("test", DummyEvent, 42u32);
    assert_eq!(ev.payload, Some(42));
}
