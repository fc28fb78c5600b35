// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pbstream
//!
//! Gzip-compressed streams of framed records.
//!
//! Every record is stored as one frame:
//!
//! ```text
//! [magic: u32 = 0xFFFFFFFF][type_tag: u16][length: u16][payload]
//! ```
//!
//! with a little-endian header and the whole stream compressed with gzip.
//! Payloads of type [`io::frame::DEVICE_APPS`] hold a protobuf `DeviceApps`
//! message, converted to and from the generic [`Record`] value.
//!
//! ## Layout
//!
//! - `core/` - Error taxonomy and the generic [`Value`] / [`Record`] model
//! - `encoding/` - Record codecs (protobuf DeviceApps) and the JSON bridge
//! - `io/` - Frame header codec, type filter, stream reader and writer
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pbstream::{Record, Value};
//!
//! let mut device = Record::new();
//! device.insert("id".to_string(), Value::from("e7e1a50c0ec2747ca56cd9e1558c0d7c"));
//! device.insert("type".to_string(), Value::from("idfa"));
//!
//! let mut record = Record::new();
//! record.insert("device".to_string(), Value::Struct(device));
//! record.insert("apps".to_string(), Value::from(vec![42u32, 43, 44]));
//!
//! let bytes = pbstream::write(vec![record], "apps.pb.gz")?;
//! println!("wrote {bytes} bytes");
//!
//! for record in pbstream::read("apps.pb.gz")? {
//!     println!("{:?}", record?.get("apps"));
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{Record, Result, StreamError, Value};

// Record codecs
pub mod encoding;

pub use encoding::{DeviceApps, DeviceAppsCodec, JsonCodec, RecordCodec};

// Frame stream I/O
pub mod io;

pub use io::{
    FrameReader, FrameWriter, RawFrameReader, ReaderConfig, ReaderState, TypeFilter, WriterConfig,
};

use std::borrow::Borrow;
use std::path::Path;

/// Write DeviceApps records to a compressed stream at `path`.
///
/// Returns the total uncompressed bytes written (headers plus payloads).
/// See [`io::write_all`].
pub fn write<I, P>(records: I, path: P) -> Result<u64>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    P: AsRef<Path>,
{
    io::write_all(records, path)
}

/// Open a compressed stream of DeviceApps records for reading.
pub fn read<P: AsRef<Path>>(path: P) -> Result<FrameReader> {
    FrameReader::open(path)
}
