// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use pbstream::io::frame::encode_header;
use pbstream::{Record, Value};

/// Build a DeviceApps record with the given optional fields.
pub fn device_apps(
    id: Option<&str>,
    device_type: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
    apps: Vec<u32>,
) -> Record {
    let mut device = Record::new();
    if let Some(id) = id {
        device.insert("id".to_string(), Value::from(id));
    }
    if let Some(ty) = device_type {
        device.insert("type".to_string(), Value::from(ty));
    }

    let mut record = Record::new();
    record.insert("device".to_string(), Value::Struct(device));
    if let Some(lat) = lat {
        record.insert("lat".to_string(), Value::Float64(lat));
    }
    if let Some(lon) = lon {
        record.insert("lon".to_string(), Value::Float64(lon));
    }
    record.insert("apps".to_string(), Value::from(apps));
    record
}

/// Encode one raw frame (header plus payload).
pub fn frame_bytes(type_tag: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = encode_header(type_tag, payload.len()).unwrap().to_vec();
    out.extend_from_slice(payload);
    out
}

/// Write `bytes` as a complete gzip stream at `path`.
pub fn write_gzip(path: &Path, bytes: &[u8]) {
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::fast());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap();
}
