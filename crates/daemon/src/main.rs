// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `l2fsmd` — loads a port configuration, wires up tracing, admits the
//! configured ports, and demonstrates frame ingestion (spec.md §10.3).
//!
//! Everything past this — link monitoring, a management API, an actual BPDU
//! MAC listener — is out of scope (spec.md §1) and is not built here.

mod config;
mod error;

use config::BridgeConfig;
use l2fsm_core::{PortContext, PortId};
use l2fsm_engine::{prx::RxBpduPdu, Port};
use l2fsm_wire::{BPDU_TYPE_RSTP, RSTP_VERSION};
use tracing_subscriber::EnvFilter;

fn apply_port_config(ctx: &mut PortContext, cfg: &config::PortConfig) {
    ctx.port_enabled = cfg.port_enabled;
    ctx.admin_edge = cfg.admin_edge;
    ctx.auto_edge_port = cfg.auto_edge_port;
}

/// A minimal, well-formed RSTP BPDU: LLC header plus protocol version/type.
/// There's no real MAC listener yet (spec.md §1), so this is what stands in
/// to prove PRX's raw-frame path is wired end to end at startup.
fn demo_bpdu_frame() -> Vec<u8> {
    vec![0x42, 0x42, 0x03, 0x00, 0x00, RSTP_VERSION, BPDU_TYPE_RSTP, 0x00, 0x00]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "bridge.toml".to_string());
    let bridge = BridgeConfig::load(&config_path)?;

    let mut ports = Vec::with_capacity(bridge.ports.len());
    for port_cfg in &bridge.ports {
        let mut port = Port::new(PortId(port_cfg.id));
        apply_port_config(&mut port.context.lock(), port_cfg);
        port.admit().await?;
        tracing::info!(port = port_cfg.id, "port admitted");

        if let Some(prx) = port.prx() {
            let pdu = RxBpduPdu::new(demo_bpdu_frame(), "daemon-startup-demo");
            if let Err(err) = prx.rx_bpdu.send(pdu).await {
                tracing::warn!(port = port_cfg.id, %err, "demo frame ingestion failed");
            } else {
                tracing::info!(port = port_cfg.id, "demo frame ingested");
            }
        }

        ports.push(port);
    }

    tracing::info!(count = ports.len(), "bridge started");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    for mut port in ports {
        port.withdraw().await?;
    }

    Ok(())
}
