// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn reset_to_migrate_time_sets_three() {
    let mut t = EdgeDelayWhileTimer::new(0);
    t.reset_to_migrate_time();
    assert_eq!(t.count, 3);
}

#[test]
fn tick_saturates_at_zero() {
    let mut t = EdgeDelayWhileTimer::new(0);
    t.tick();
    assert_eq!(t.count, 0);
    assert!(t.is_zero());
}

#[test]
fn tick_decrements() {
    let mut t = EdgeDelayWhileTimer::new(3);
    t.tick();
    assert_eq!(t.count, 2);
}
