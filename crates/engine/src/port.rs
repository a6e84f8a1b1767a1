// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Port` — owns one `PortContext` plus the PRX and BDM harnesses running
//! against it (spec.md §3 "Lifecycles", §4.B, §5).

use l2fsm_core::{MachineEvent, PortContext, PortId};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::bdm::{self, BdmEvent, BdmHandle};
use crate::error::EngineError;
use crate::prx::{self, PrxEvent, PrxHandle};

/// A logical bridge port: the shared `PortContext` plus its PRX and BDM
/// machine harnesses.
///
/// Neither harness exists until [`Port::admit`] spawns it; [`Port::withdraw`]
/// kills both, waits for their driver tasks to exit, and then drops their
/// queues — in that order, so nothing can be sent to a harness after its
/// task has stopped reading (spec.md §5).
pub struct Port {
    pub id: PortId,
    pub context: Arc<Mutex<PortContext>>,
    prx: Option<PrxHandle>,
    bdm: Option<BdmHandle>,
    prx_join: Option<JoinHandle<()>>,
    bdm_join: Option<JoinHandle<()>>,
}

impl Port {
    pub fn new(id: PortId) -> Self {
        Self {
            id,
            context: Arc::new(Mutex::new(PortContext::new(id))),
            prx: None,
            bdm: None,
            prx_join: None,
            bdm_join: None,
        }
    }

    pub fn is_admitted(&self) -> bool {
        self.prx.is_some()
    }

    pub fn prx(&self) -> Option<&PrxHandle> {
        self.prx.as_ref()
    }

    pub fn bdm(&self) -> Option<&BdmHandle> {
        self.bdm.as_ref()
    }

    /// Spawn PRX and BDM and deliver their initial `Begin` events
    /// (spec.md §3). BDM's variant depends on `admin_edge` as configured on
    /// the `PortContext` at the moment of admission.
    pub async fn admit(&mut self) -> Result<(), EngineError> {
        if self.is_admitted() {
            return Err(EngineError::AlreadyAdmitted);
        }

        let (prx_handle, prx_join) = prx::spawn(self.context.clone());
        let (bdm_handle, bdm_join) = bdm::spawn(self.context.clone());

        let admin_edge = self.context.lock().admin_edge;
        let bdm_begin = if admin_edge { BdmEvent::BeginAdminEdge } else { BdmEvent::BeginNotAdminEdge };

        // Wait for both Begin events to be fully processed (action plus any
        // post-state hook) before returning, so callers observe a port that
        // has actually reached its documented initial state (spec.md §8).
        let (prx_begin, prx_ack) = MachineEvent::new("port-admit", PrxEvent::Begin).with_response();
        let (bdm_begin, bdm_ack) = MachineEvent::new("port-admit", bdm_begin).with_response();

        prx_handle.events.send(prx_begin).await.map_err(|_| EngineError::SendAfterClose)?;
        bdm_handle.events.send(bdm_begin).await.map_err(|_| EngineError::SendAfterClose)?;
        let _ = prx_ack.await;
        let _ = bdm_ack.await;

        self.prx = Some(prx_handle);
        self.bdm = Some(bdm_handle);
        self.prx_join = Some(prx_join);
        self.bdm_join = Some(bdm_join);
        Ok(())
    }

    /// Kill both harnesses and wait for their driver tasks to exit.
    pub async fn withdraw(&mut self) -> Result<(), EngineError> {
        let mut prx = self.prx.take().ok_or(EngineError::NotAdmitted)?;
        let mut bdm = self.bdm.take().ok_or(EngineError::NotAdmitted)?;

        prx.kill()?;
        bdm.kill()?;

        if let Some(join) = self.prx_join.take() {
            let _ = join.await;
        }
        if let Some(join) = self.bdm_join.take() {
            let _ = join.await;
        }

        drop(prx);
        drop(bdm);
        Ok(())
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
