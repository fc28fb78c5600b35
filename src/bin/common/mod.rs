// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use pbstream::{Record, Value};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Parse a frame type tag given as decimal or `0x`-prefixed hex.
pub fn parse_type_tag(s: &str) -> std::result::Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|_| format!("invalid type tag: {s} (expected 0-65535)"))
}

/// The fixed DeviceApps record used by the `example` command.
pub fn example_record() -> Record {
    let mut device = Record::new();
    device.insert(
        "id".to_string(),
        Value::from("e7e1a50c0ec2747ca56cd9e1558c0d7c"),
    );
    device.insert("type".to_string(), Value::from("idfa"));

    let mut record = Record::new();
    record.insert("device".to_string(), Value::Struct(device));
    record.insert("lat".to_string(), Value::Float64(67.7835424444));
    record.insert("lon".to_string(), Value::Float64(-22.8044005471));
    record.insert("apps".to_string(), Value::from(vec![42u32, 43, 44]));
    record
}

/// Format a byte count to a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_tag() {
        assert_eq!(parse_type_tag("1"), Ok(1));
        assert_eq!(parse_type_tag("0xFFFF"), Ok(u16::MAX));
        assert!(parse_type_tag("65536").is_err());
        assert!(parse_type_tag("abc").is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
    }

    #[test]
    fn test_example_record_shape() {
        let record = example_record();
        assert_eq!(record.len(), 4);
        assert_eq!(record["apps"].as_array().map(|a| a.len()), Some(3));
    }
}
