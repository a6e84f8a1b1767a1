// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML port configuration (spec.md §10.3) — ambient plumbing for the
//! `l2fsmd` binary only, not a management API: no live reconfiguration.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub ports: Vec<PortConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortConfig {
    pub id: u32,
    #[serde(default)]
    pub admin_edge: bool,
    #[serde(default)]
    pub auto_edge_port: bool,
    #[serde(default = "default_port_enabled")]
    pub port_enabled: bool,
    #[serde(default = "default_priority")]
    pub priority: u16,
    pub mac: [u8; 6],
}

fn default_port_enabled() -> bool {
    true
}

fn default_priority() -> u16 {
    0x8000
}

impl BridgeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
