// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! l2fsm-wire: the BPDU Classifier (spec.md §4.F) and the System Identity
//! codec (spec.md §4.G). Pure functions over byte buffers — no channels,
//! no shared state, nothing async.

pub mod bpdu;
pub mod sysid;

pub use bpdu::{classify, ClassifiedFrame, PduType};
pub use sysid::{build_system_id, SystemIdentity};
