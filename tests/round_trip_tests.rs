// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Write-then-read tests over real files.

mod common;

use common::device_apps;
use pbstream::{DeviceAppsCodec, Record, RecordCodec, Value};
use proptest::prelude::*;

fn write_and_read(records: &[Record]) -> Vec<Record> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.pb.gz");
    pbstream::write(records, &path).unwrap();
    pbstream::read(&path)
        .unwrap()
        .collect::<pbstream::Result<_>>()
        .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_record_scenario() {
    let mut device = Record::new();
    device.insert("id".to_string(), Value::from("abc"));
    device.insert("type".to_string(), Value::from("idfa"));
    let mut first = Record::new();
    first.insert("device".to_string(), Value::Struct(device));
    first.insert("lat".to_string(), Value::Float64(67.78));
    first.insert("lon".to_string(), Value::Float64(-22.80));
    first.insert("apps".to_string(), Value::from(vec![42u32, 43, 44]));

    let mut second = Record::new();
    second.insert("device".to_string(), Value::Struct(Record::new()));
    second.insert("apps".to_string(), Value::Array(Vec::new()));

    let read = write_and_read(&[first.clone(), second.clone()]);
    assert_eq!(read, vec![first, second]);
    assert!(!read[1].contains_key("lat"));
    assert!(!read[1].contains_key("lon"));
    assert!(read[1]["device"].as_struct().unwrap().is_empty());
}

#[test]
fn test_apps_order_preserved() {
    let read = write_and_read(&[device_apps(None, None, None, None, vec![42, 43, 44])]);
    assert_eq!(
        read[0]["apps"],
        Value::Array(vec![
            Value::UInt32(42),
            Value::UInt32(43),
            Value::UInt32(44)
        ])
    );
}

#[test]
fn test_every_presence_combination() {
    let mut records = Vec::new();
    for mask in 0u8..16 {
        records.push(device_apps(
            (mask & 1 != 0).then_some("id"),
            (mask & 2 != 0).then_some("gaid"),
            (mask & 4 != 0).then_some(1.5),
            (mask & 8 != 0).then_some(-2.5),
            vec![mask as u32],
        ));
    }
    assert_eq!(write_and_read(&records), records);
}

#[test]
fn test_empty_input_writes_empty_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pb.gz");
    let written = pbstream::write(Vec::<Record>::new(), &path).unwrap();
    assert_eq!(written, 0);
    assert_eq!(pbstream::read(&path).unwrap().count(), 0);
}

#[test]
fn test_byte_count_matches_frames() {
    let records = vec![
        device_apps(Some("a"), None, None, None, vec![1]),
        device_apps(None, Some("idfa"), Some(1.0), None, vec![]),
    ];
    let codec = DeviceAppsCodec::new();
    let expected: u64 = records
        .iter()
        .map(|r| 8 + codec.encode(r).unwrap().len() as u64)
        .sum();

    let dir = tempfile::tempdir().unwrap();
    let written = pbstream::write(&records, dir.path().join("s.pb.gz")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn test_nulls_read_back_absent() {
    let mut device = Record::new();
    device.insert("id".to_string(), Value::Null);
    let mut record = Record::new();
    record.insert("device".to_string(), Value::Struct(device));
    record.insert("lat".to_string(), Value::Null);
    record.insert("apps".to_string(), Value::Array(Vec::new()));

    let read = write_and_read(&[record]);
    assert_eq!(read[0], device_apps(None, None, None, None, vec![]));
}

// ============================================================================
// Properties
// ============================================================================

fn arb_record() -> impl Strategy<Value = Record> {
    (
        proptest::option::of("[a-f0-9]{0,32}"),
        proptest::option::of("[a-z]{0,8}"),
        proptest::option::of(-90.0f64..90.0),
        proptest::option::of(-180.0f64..180.0),
        proptest::collection::vec(any::<u32>(), 0..64),
    )
        .prop_map(|(id, ty, lat, lon, apps)| {
            device_apps(id.as_deref(), ty.as_deref(), lat, lon, apps)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_codec_round_trip(record in arb_record()) {
        let codec = DeviceAppsCodec::new();
        let payload = codec.encode(&record).unwrap();
        prop_assert_eq!(codec.decode(&payload).unwrap(), record);
    }

    #[test]
    fn prop_stream_round_trip(records in proptest::collection::vec(arb_record(), 0..8)) {
        prop_assert_eq!(write_and_read(&records), records);
    }
}
