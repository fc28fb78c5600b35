// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for framed record streams.
//!
//! - [`frame`] - Fixed 8-byte frame header codec
//! - [`filter`] - Type tag filtering for readers
//! - [`reader`] - Forward-only frame and record readers
//! - [`writer`] - Gzip-compressed frame writer

pub mod filter;
pub mod frame;
pub mod reader;
pub mod writer;

pub use filter::TypeFilter;
pub use frame::{
    encode_header, Frame, FrameHeader, DEVICE_APPS, HEADER_LEN, MAGIC, MAX_PAYLOAD_LEN,
};
pub use reader::{FrameReader, RawFrameReader, ReaderBuilder, ReaderConfig, ReaderState};
pub use writer::{
    write_all, write_all_with, write_all_with_config, FrameWriter, WriterBuilder, WriterConfig,
};
