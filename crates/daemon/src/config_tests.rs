// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_a_minimal_port_list() {
    let file = write_temp(
        r#"
        [[ports]]
        id = 1
        mac = [0, 17, 34, 51, 68, 85]

        [[ports]]
        id = 2
        admin_edge = true
        auto_edge_port = true
        priority = 4096
        mac = [0, 17, 34, 51, 68, 86]
        "#,
    );

    let config = BridgeConfig::load(file.path()).unwrap();
    assert_eq!(config.ports.len(), 2);
    assert_eq!(config.ports[0].id, 1);
    assert!(config.ports[0].port_enabled);
    assert_eq!(config.ports[0].priority, 0x8000);
    assert!(!config.ports[0].admin_edge);
    assert!(config.ports[1].admin_edge);
    assert_eq!(config.ports[1].priority, 4096);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = BridgeConfig::load("/nonexistent/path/bridge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp("not valid = = toml");
    let err = BridgeConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
