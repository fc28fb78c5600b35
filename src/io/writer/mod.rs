// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame stream writer.
//!
//! [`FrameWriter`] encodes records with a [`RecordCodec`], prefixes each
//! payload with a frame header and pushes the result through a gzip encoder.
//! Writes are not transactional: if a record fails to encode, frames written
//! before it stay in the file and the gzip stream is still terminated so
//! that prefix remains readable.
//!
//! # Example
//!
//! ```rust,no_run
//! use pbstream::io::writer::FrameWriter;
//! use pbstream::{Record, Value};
//!
//! let mut device = Record::new();
//! device.insert("id".to_string(), Value::from("abc"));
//!
//! let mut record = Record::new();
//! record.insert("device".to_string(), Value::Struct(device));
//! record.insert("apps".to_string(), Value::from(vec![1u32, 2, 3]));
//!
//! let mut writer = FrameWriter::create("apps.pb.gz")?;
//! writer.write_record(&record)?;
//! let total = writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;

pub use builder::{WriterBuilder, WriterConfig, DEFAULT_COMPRESSION_LEVEL};

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use tracing::{debug, info, warn};

use crate::encoding::{DeviceAppsCodec, RecordCodec};
use crate::io::frame::FrameHeader;
use crate::{Record, Result, StreamError};

/// Writer producing a gzip-compressed frame stream.
#[derive(Debug)]
pub struct FrameWriter<C: RecordCodec = DeviceAppsCodec, W: Write = BufWriter<File>> {
    /// Path or label of the destination, for logging
    path: String,
    /// Compressing sink; `None` once finished
    encoder: Option<GzEncoder<W>>,
    codec: C,
    /// Uncompressed header and payload bytes written
    bytes_written: u64,
    frames_written: u64,
}

impl FrameWriter<DeviceAppsCodec, BufWriter<File>> {
    /// Create a DeviceApps stream with default configuration.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_config(path, &WriterConfig::default())
    }

    /// Create a DeviceApps stream with explicit configuration.
    pub fn create_with_config<P: AsRef<Path>>(path: P, config: &WriterConfig) -> Result<Self> {
        Self::create_with(path, DeviceAppsCodec::new(), config)
    }
}

impl<C: RecordCodec> FrameWriter<C, BufWriter<File>> {
    /// Create a stream for an arbitrary codec.
    pub fn create_with<P: AsRef<Path>>(path: P, codec: C, config: &WriterConfig) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();
        let compression = config.compression()?;

        let file =
            File::create(path_ref).map_err(|e| StreamError::open(&path_str, e.to_string()))?;
        debug!(
            context = "FrameWriter",
            path = %path_str,
            level = config.compression_level,
            codec = codec.name(),
            "Created frame stream"
        );

        Ok(Self::new(
            path_str,
            GzEncoder::new(BufWriter::new(file), compression),
            codec,
        ))
    }
}

impl<C: RecordCodec, W: Write> FrameWriter<C, W> {
    /// Write a compressed stream into an arbitrary sink.
    pub fn from_writer(
        label: impl Into<String>,
        writer: W,
        codec: C,
        config: &WriterConfig,
    ) -> Result<Self> {
        let compression = config.compression()?;
        Ok(Self::new(
            label.into(),
            GzEncoder::new(writer, compression),
            codec,
        ))
    }

    fn new(path: String, encoder: GzEncoder<W>, codec: C) -> Self {
        Self {
            path,
            encoder: Some(encoder),
            codec,
            bytes_written: 0,
            frames_written: 0,
        }
    }

    /// Encode a record and write it as one frame tagged with the codec's type.
    ///
    /// Returns the bytes written for this frame (header plus payload).
    pub fn write_record(&mut self, record: &Record) -> Result<u64> {
        let payload = self.codec.encode(record)?;
        self.write_frame(self.codec.type_tag(), &payload)
    }

    /// Write a pre-encoded payload as one frame of any type.
    ///
    /// Fails with [`StreamError::InvalidLength`] when the payload does not
    /// fit the 16-bit length field; nothing is written in that case.
    pub fn write_frame(&mut self, type_tag: u16, payload: &[u8]) -> Result<u64> {
        let header = FrameHeader::new(type_tag, payload.len())?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| StreamError::io("write frame", "writer already finished"))?;

        encoder
            .write_all(&header.encode())
            .map_err(|e| StreamError::io("write frame header", e))?;
        encoder
            .write_all(payload)
            .map_err(|e| StreamError::io("write frame payload", e))?;

        let written = header.frame_len() as u64;
        self.bytes_written += written;
        self.frames_written += 1;
        Ok(written)
    }

    /// Terminate the gzip stream and flush the destination.
    ///
    /// Returns the total uncompressed bytes written. Calling it again
    /// returns the same total without writing anything.
    pub fn finish(&mut self) -> Result<u64> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(self.bytes_written);
        };

        let mut inner = encoder
            .finish()
            .map_err(|e| StreamError::io("finish gzip stream", e))?;
        inner
            .flush()
            .map_err(|e| StreamError::io("flush stream", e))?;

        debug!(
            context = "FrameWriter",
            path = %self.path,
            frames = self.frames_written,
            bytes = self.bytes_written,
            "Closed frame stream"
        );
        Ok(self.bytes_written)
    }

    /// Close the stream on an error path, keeping what was written so far.
    ///
    /// A failure to close is logged, not returned, so the caller's original
    /// error wins.
    pub fn abort(&mut self) {
        if let Err(e) = self.finish() {
            warn!(
                context = "FrameWriter",
                path = %self.path,
                error = %e,
                fields = ?e.log_fields(),
                "Failed to close stream"
            );
        }
    }

    /// Path or label of the destination.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Uncompressed bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Whether [`FrameWriter::finish`] has run.
    pub fn is_finished(&self) -> bool {
        self.encoder.is_none()
    }

    /// The codec records are encoded with.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Finish and hand back the underlying sink.
    pub fn into_inner(mut self) -> Result<Option<W>> {
        match self.encoder.take() {
            Some(encoder) => encoder
                .finish()
                .map(Some)
                .map_err(|e| StreamError::io("finish gzip stream", e)),
            None => Ok(None),
        }
    }
}

impl<C: RecordCodec, W: Write> Drop for FrameWriter<C, W> {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            self.abort();
        }
    }
}

/// Write every record to `path` as DeviceApps frames.
///
/// Returns the total uncompressed bytes written (headers plus payloads).
pub fn write_all<I, P>(records: I, path: P) -> Result<u64>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    P: AsRef<Path>,
{
    write_all_with_config(records, path, &WriterConfig::default())
}

/// [`write_all`] with explicit writer configuration.
pub fn write_all_with_config<I, P>(records: I, path: P, config: &WriterConfig) -> Result<u64>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    P: AsRef<Path>,
{
    write_all_with(records, path, DeviceAppsCodec::new(), config)
}

/// [`write_all`] with an explicit codec and configuration.
///
/// On an encode failure the stream is closed and the error returned; frames
/// written before the failing record remain readable.
pub fn write_all_with<I, P, C>(records: I, path: P, codec: C, config: &WriterConfig) -> Result<u64>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    P: AsRef<Path>,
    C: RecordCodec,
{
    let mut writer = FrameWriter::create_with(path, codec, config)?;

    for record in records {
        if let Err(e) = writer.write_record(record.borrow()) {
            writer.abort();
            return Err(e);
        }
    }

    let total = writer.finish()?;
    info!(
        context = "FrameWriter",
        path = %writer.path(),
        frames = writer.frames_written(),
        bytes = total,
        "Wrote frame stream"
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::frame::{HEADER_LEN, MAX_PAYLOAD_LEN};
    use crate::io::reader::{RawFrameReader, ReaderConfig};
    use crate::io::filter::TypeFilter;
    use crate::Value;
    use flate2::read::MultiGzDecoder;
    use std::io::Cursor;

    fn sample_record(apps: Vec<u32>) -> Record {
        let mut device = Record::new();
        device.insert("id".to_string(), Value::from("abc"));
        let mut record = Record::new();
        record.insert("device".to_string(), Value::Struct(device));
        record.insert("apps".to_string(), Value::from(apps));
        record
    }

    fn memory_writer() -> FrameWriter<DeviceAppsCodec, Vec<u8>> {
        FrameWriter::from_writer(
            "memory",
            Vec::new(),
            DeviceAppsCodec::new(),
            &WriterConfig::default(),
        )
        .unwrap()
    }

    fn raw_frames(compressed: Vec<u8>) -> Vec<crate::io::frame::Frame> {
        let source = MultiGzDecoder::new(Cursor::new(compressed));
        RawFrameReader::from_reader("memory", source, ReaderConfig::default(), TypeFilter::All)
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_write_record_returns_frame_size() {
        let mut writer = memory_writer();
        let payload_len = DeviceAppsCodec::new()
            .encode(&sample_record(vec![1, 2]))
            .unwrap()
            .len();

        let written = writer.write_record(&sample_record(vec![1, 2])).unwrap();
        assert_eq!(written, (HEADER_LEN + payload_len) as u64);
        assert_eq!(writer.finish().unwrap(), written);
    }

    #[test]
    fn test_interleaved_raw_frames() {
        let mut writer = memory_writer();
        writer.write_frame(7, b"other").unwrap();
        writer.write_record(&sample_record(vec![5])).unwrap();
        let sink = writer.into_inner().unwrap().unwrap();

        let frames = raw_frames(sink);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].type_tag(), 7);
        assert_eq!(frames[0].payload, b"other");
        assert_eq!(frames[1].type_tag(), crate::io::frame::DEVICE_APPS);
        assert_eq!(frames[1].offset, (HEADER_LEN + 5) as u64);
    }

    #[test]
    fn test_oversized_payload_writes_nothing() {
        let mut writer = memory_writer();
        let err = writer
            .write_frame(1, &vec![0u8; MAX_PAYLOAD_LEN + 1])
            .unwrap_err();
        assert_eq!(
            err,
            StreamError::invalid_length(MAX_PAYLOAD_LEN + 1, MAX_PAYLOAD_LEN)
        );
        assert_eq!(writer.frames_written(), 0);
        assert_eq!(writer.bytes_written(), 0);

        writer.write_frame(1, &vec![0u8; MAX_PAYLOAD_LEN]).unwrap();
        let frames = raw_frames(writer.into_inner().unwrap().unwrap());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload.len(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn test_write_after_finish_fails() {
        let mut writer = memory_writer();
        writer.finish().unwrap();
        assert!(writer.is_finished());
        let err = writer.write_frame(1, b"late").unwrap_err();
        assert!(matches!(err, StreamError::Io { .. }));
        assert_eq!(writer.finish().unwrap(), 0);
    }

    #[test]
    fn test_empty_stream() {
        let writer = memory_writer();
        let sink = writer.into_inner().unwrap().unwrap();
        assert!(!sink.is_empty());
        assert!(raw_frames(sink).is_empty());
    }

    #[test]
    fn test_write_all_abort_keeps_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.pb.gz");

        let mut bad = Record::new();
        bad.insert("apps".to_string(), Value::from(vec![1u32]));
        let records = vec![sample_record(vec![1]), sample_record(vec![2]), bad];

        let err = write_all(&records, &path).unwrap_err();
        assert_eq!(err, StreamError::missing_field("device"));

        let frames: Vec<_> = RawFrameReader::open(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 2);
    }
}
