// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame stream readers.
//!
//! Two layers:
//! - [`RawFrameReader`] scans frames out of a decompressed byte stream,
//!   detects clean end-of-stream versus truncation, validates the magic
//!   sentinel and drops frames rejected by its [`TypeFilter`].
//! - [`FrameReader`] sits on top, keeps only its codec's type tag and
//!   decodes each payload into a [`Record`].
//!
//! Both are forward-only iterators. Once a reader is exhausted or has
//! failed it yields nothing more; re-reading a file means opening it again.
//!
//! # Example
//!
//! ```rust,no_run
//! use pbstream::io::reader::FrameReader;
//!
//! for record in FrameReader::open("apps.pb.gz")? {
//!     let record = record?;
//!     println!("{:?}", record.get("apps"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;

pub use builder::{ReaderBuilder, ReaderConfig};

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, trace};

use crate::encoding::{DeviceAppsCodec, RecordCodec};
use crate::io::filter::TypeFilter;
use crate::io::frame::{Frame, FrameHeader, HEADER_LEN};
use crate::{Record, Result, StreamError};

/// Decompressing byte source for a stream file.
pub type GzSource = MultiGzDecoder<BufReader<File>>;

/// Lifecycle of a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Opened, nothing read yet
    Open,
    /// At least one frame has been yielded
    Yielding,
    /// Stream ended cleanly at a frame boundary, or the reader was closed
    Exhausted,
    /// A read or decode error occurred
    Failed,
}

impl ReaderState {
    /// Whether the reader will yield no further frames.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReaderState::Exhausted | ReaderState::Failed)
    }
}

/// Reader over raw frames.
#[derive(Debug)]
pub struct RawFrameReader<R: Read = GzSource> {
    /// Path or label of the source, for logging
    path: String,
    /// Byte source; `None` once released
    stream: Option<R>,
    config: ReaderConfig,
    filter: TypeFilter,
    state: ReaderState,
    /// Decompressed bytes consumed so far
    position: u64,
    frames_read: u64,
    frames_skipped: u64,
}

impl RawFrameReader<GzSource> {
    /// Open a compressed stream yielding every frame.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default(), TypeFilter::All)
    }

    /// Open a compressed stream with explicit configuration and filter.
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
        filter: TypeFilter,
    ) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref).map_err(|e| StreamError::open(&path_str, e.to_string()))?;
        debug!(
            context = "RawFrameReader",
            path = %path_str,
            verify_magic = config.verify_magic,
            "Opened frame stream"
        );

        Ok(Self::new(
            path_str,
            MultiGzDecoder::new(BufReader::new(file)),
            config,
            filter,
        ))
    }
}

impl<R: Read> RawFrameReader<R> {
    /// Read frames from an already decompressed byte source.
    pub fn from_reader(
        label: impl Into<String>,
        reader: R,
        config: ReaderConfig,
        filter: TypeFilter,
    ) -> Self {
        Self::new(label.into(), reader, config, filter)
    }

    fn new(path: String, stream: R, config: ReaderConfig, filter: TypeFilter) -> Self {
        Self {
            path,
            stream: Some(stream),
            config,
            filter,
            state: ReaderState::Open,
            position: 0,
            frames_read: 0,
            frames_skipped: 0,
        }
    }

    /// Read the next frame accepted by the filter.
    ///
    /// Returns `Ok(None)` on clean end-of-stream. Any error leaves the
    /// reader in [`ReaderState::Failed`] with the stream released.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        match self.scan() {
            Ok(Some(frame)) => {
                self.state = ReaderState::Yielding;
                Ok(Some(frame))
            }
            Ok(None) => {
                debug!(
                    context = "RawFrameReader",
                    path = %self.path,
                    frames_read = self.frames_read,
                    frames_skipped = self.frames_skipped,
                    "Reached end of stream"
                );
                self.state = ReaderState::Exhausted;
                self.stream = None;
                Ok(None)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Scan forward to the next accepted frame.
    fn scan(&mut self) -> Result<Option<Frame>> {
        loop {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(None);
            };

            let offset = self.position;
            let Some(header) = read_header(stream)? else {
                return Ok(None);
            };
            self.position += HEADER_LEN as u64;

            if self.config.verify_magic && !header.has_valid_magic() {
                return Err(StreamError::corrupt_frame(header.magic));
            }

            if !self.filter.should_include(header.type_tag) {
                skip_payload(stream, &header)?;
                self.position += header.length as u64;
                self.frames_skipped += 1;
                trace!(
                    context = "RawFrameReader",
                    offset,
                    type_tag = header.type_tag,
                    length = header.length,
                    "Skipped frame"
                );
                continue;
            }

            let payload = read_payload(stream, &header)?;
            self.position += header.length as u64;
            self.frames_read += 1;
            return Ok(Some(Frame {
                offset,
                header,
                payload,
            }));
        }
    }

    /// Move to the failed state and release the stream.
    pub(crate) fn fail(&mut self, err: &StreamError) {
        debug!(
            context = "RawFrameReader",
            path = %self.path,
            position = self.position,
            error = %err,
            "Frame stream failed"
        );
        self.state = ReaderState::Failed;
        self.stream = None;
    }

    /// Release the underlying stream.
    ///
    /// Safe to call at any point and more than once. A reader closed before
    /// exhaustion yields nothing further. Dropping the reader has the same
    /// effect.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!(context = "RawFrameReader", path = %self.path, "Closed frame stream");
        }
        if !self.state.is_terminal() {
            self.state = ReaderState::Exhausted;
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Path or label of the source.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decompressed bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Frames yielded so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Frames dropped by the filter so far.
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}

impl<R: Read> Iterator for RawFrameReader<R> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

impl<R: Read> FusedIterator for RawFrameReader<R> {}

/// Reader yielding decoded records of one codec's type.
#[derive(Debug)]
pub struct FrameReader<C: RecordCodec = DeviceAppsCodec, R: Read = GzSource> {
    raw: RawFrameReader<R>,
    codec: C,
}

impl FrameReader<DeviceAppsCodec, GzSource> {
    /// Open a compressed stream of DeviceApps records.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, DeviceAppsCodec::new(), ReaderConfig::default())
    }
}

impl<C: RecordCodec> FrameReader<C, GzSource> {
    /// Open a compressed stream with an explicit codec and configuration.
    pub fn open_with<P: AsRef<Path>>(path: P, codec: C, config: ReaderConfig) -> Result<Self> {
        let filter = TypeFilter::only(codec.type_tag());
        let raw = RawFrameReader::open_with_config(path, config, filter)?;
        Ok(Self { raw, codec })
    }
}

impl<C: RecordCodec, R: Read> FrameReader<C, R> {
    /// Read records from an already decompressed byte source.
    pub fn from_reader(label: impl Into<String>, reader: R, codec: C, config: ReaderConfig) -> Self {
        let filter = TypeFilter::only(codec.type_tag());
        Self {
            raw: RawFrameReader::from_reader(label, reader, config, filter),
            codec,
        }
    }

    /// Read and decode the next matching record.
    ///
    /// Returns `Ok(None)` on clean end-of-stream.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let Some(frame) = self.raw.next_frame()? else {
            return Ok(None);
        };

        match self.codec.decode(&frame.payload) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                self.raw.fail(&e);
                Err(e)
            }
        }
    }

    /// Release the underlying stream. See [`RawFrameReader::close`].
    pub fn close(&mut self) {
        self.raw.close();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReaderState {
        self.raw.state()
    }

    /// Records decoded so far.
    pub fn records_read(&self) -> u64 {
        self.raw.frames_read()
    }

    /// Frames of other types skipped so far.
    pub fn frames_skipped(&self) -> u64 {
        self.raw.frames_skipped()
    }

    /// The codec records are decoded with.
    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: RecordCodec, R: Read> Iterator for FrameReader<C, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<C: RecordCodec, R: Read> FusedIterator for FrameReader<C, R> {}

/// Scratch size for draining skipped payloads.
const SKIP_CHUNK: usize = 4096;

/// Fill `buf` as far as the source allows, returning the bytes read.
///
/// Unlike `read_exact`, a short read is reported by count so callers can
/// tell a clean end-of-stream (0) from truncation. A compressed source cut
/// off mid-stream raises `UnexpectedEof`; once some bytes are in, that ends
/// the fill like a plain EOF. With nothing filled it is returned as is.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && filled > 0 => break,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Map a read failure, turning a cut-off source into `truncated`.
fn read_error(err: io::Error, context: &str, truncated: StreamError) -> StreamError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        truncated
    } else {
        StreamError::io(context, err)
    }
}

fn read_header<R: Read>(reader: &mut R) -> Result<Option<FrameHeader>> {
    let mut buf = [0u8; HEADER_LEN];
    let n = read_full(reader, &mut buf)
        .map_err(|e| read_error(e, "read frame header", StreamError::truncated_header(0)))?;
    match n {
        0 => Ok(None),
        n if n < HEADER_LEN => Err(StreamError::truncated_header(n)),
        _ => FrameHeader::decode(&buf).map(Some),
    }
}

fn read_payload<R: Read>(reader: &mut R, header: &FrameHeader) -> Result<Vec<u8>> {
    let expected = header.payload_len();
    let mut payload = vec![0u8; expected];
    let n = read_full(reader, &mut payload).map_err(|e| {
        read_error(
            e,
            "read frame payload",
            StreamError::truncated_payload(expected, 0),
        )
    })?;
    if n < expected {
        return Err(StreamError::truncated_payload(expected, n));
    }
    Ok(payload)
}

fn skip_payload<R: Read>(reader: &mut R, header: &FrameHeader) -> Result<()> {
    let expected = header.payload_len();
    let mut scratch = [0u8; SKIP_CHUNK];
    let mut skipped = 0;

    while skipped < expected {
        let want = (expected - skipped).min(SKIP_CHUNK);
        let n = read_full(reader, &mut scratch[..want]).map_err(|e| {
            read_error(
                e,
                "skip frame payload",
                StreamError::truncated_payload(expected, skipped),
            )
        })?;
        skipped += n;
        if n < want {
            return Err(StreamError::truncated_payload(expected, skipped));
        }
    }
    Ok(())
}
