// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating frame readers.

use std::path::PathBuf;

use crate::encoding::{DeviceAppsCodec, RecordCodec};
use crate::io::filter::TypeFilter;
use crate::{Result, StreamError};

use super::{FrameReader, GzSource, RawFrameReader};

/// Configuration shared by frame readers.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Reject frames whose header does not start with the magic sentinel
    pub verify_magic: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { verify_magic: true }
    }
}

impl ReaderConfig {
    /// Enable or disable magic verification.
    pub fn verify_magic(mut self, verify: bool) -> Self {
        self.verify_magic = verify;
        self
    }
}

/// Builder for creating frame readers.
///
/// # Example
///
/// ```rust,no_run
/// use pbstream::io::reader::ReaderBuilder;
/// use pbstream::io::filter::TypeFilter;
///
/// // Decoded DeviceApps records
/// let records = ReaderBuilder::new().path("apps.pb.gz").build()?;
///
/// // Raw frames of every type, tolerating bad magic
/// let frames = ReaderBuilder::new()
///     .path("apps.pb.gz")
///     .verify_magic(false)
///     .filter(TypeFilter::All)
///     .build_raw()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    path: PathBuf,
    config: ReaderConfig,
    filter: TypeFilter,
}

impl ReaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the compressed stream.
    pub fn path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Enable or disable magic verification.
    pub fn verify_magic(mut self, verify: bool) -> Self {
        self.config.verify_magic = verify;
        self
    }

    /// Set the frame filter used by [`ReaderBuilder::build_raw`].
    ///
    /// Record readers always filter on their codec's type tag.
    pub fn filter(mut self, filter: TypeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build a raw frame reader.
    pub fn build_raw(self) -> Result<RawFrameReader<GzSource>> {
        self.check_path()?;
        RawFrameReader::open_with_config(&self.path, self.config, self.filter)
    }

    /// Build a DeviceApps record reader.
    pub fn build(self) -> Result<FrameReader<DeviceAppsCodec, GzSource>> {
        self.build_with_codec(DeviceAppsCodec::new())
    }

    /// Build a record reader for an arbitrary codec.
    pub fn build_with_codec<C: RecordCodec>(self, codec: C) -> Result<FrameReader<C, GzSource>> {
        self.check_path()?;
        FrameReader::open_with(&self.path, codec, self.config)
    }

    fn check_path(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StreamError::open("", "path is not set"));
        }
        Ok(())
    }
}
