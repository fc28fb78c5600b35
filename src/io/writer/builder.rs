// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating frame writers.

use std::path::PathBuf;

use flate2::Compression;

use crate::encoding::{DeviceAppsCodec, RecordCodec};
use crate::{Result, StreamError};

use super::FrameWriter;

/// Fastest gzip level; streams favor throughput over ratio.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 1;

/// Configuration for creating a writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Gzip compression level (0-9)
    pub compression_level: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl WriterConfig {
    /// Set the gzip compression level (0-9).
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Validated flate2 compression setting.
    pub(crate) fn compression(&self) -> Result<Compression> {
        if self.compression_level > 9 {
            return Err(StreamError::out_of_range(
                "compression_level",
                self.compression_level,
            ));
        }
        Ok(Compression::new(self.compression_level))
    }
}

/// Builder for creating frame writers.
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    path: PathBuf,
    config: WriterConfig,
}

impl WriterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the output file.
    pub fn path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the gzip compression level (0-9).
    pub fn compression_level(mut self, level: u32) -> Self {
        self.config.compression_level = level;
        self
    }

    /// Build a DeviceApps writer.
    pub fn build(self) -> Result<FrameWriter<DeviceAppsCodec>> {
        self.build_with_codec(DeviceAppsCodec::new())
    }

    /// Build a writer for an arbitrary codec.
    pub fn build_with_codec<C: RecordCodec>(self, codec: C) -> Result<FrameWriter<C>> {
        if self.path.as_os_str().is_empty() {
            return Err(StreamError::open("", "path is not set"));
        }
        FrameWriter::create_with(&self.path, codec, &self.config)
    }
}
