// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Write command - convert JSON lines into a frame stream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;

use crate::common::{format_bytes, Result};
use pbstream::io::writer::{FrameWriter, WriterConfig, DEFAULT_COMPRESSION_LEVEL};
use pbstream::JsonCodec;

/// Convert JSON lines into a DeviceApps frame stream.
#[derive(Args, Clone, Debug)]
pub struct WriteCmd {
    /// Input file with one JSON object per line
    #[arg(value_name = "INPUT.jsonl")]
    input: PathBuf,

    /// Output stream file
    #[arg(value_name = "OUTPUT.pb.gz")]
    output: PathBuf,

    /// Gzip compression level (0-9)
    #[arg(short, long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    level: u32,
}

impl WriteCmd {
    pub fn run(self) -> Result<()> {
        let input = File::open(&self.input)
            .with_context(|| format!("Failed to open {}", self.input.display()))?;

        let config = WriterConfig::default().compression_level(self.level);
        let mut writer = FrameWriter::create_with_config(&self.output, &config)?;
        let json = JsonCodec::new();

        for (index, line) in BufReader::new(input).lines().enumerate() {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    writer.abort();
                    return Err(e).with_context(|| format!("Failed to read line {line_no}"));
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let written = json
                .decode(&line)
                .and_then(|record| writer.write_record(&record));
            if let Err(e) = written {
                writer.abort();
                return Err(e).with_context(|| format!("Line {line_no}"));
            }
            debug!(context = "write", line = line_no, "Wrote record");
        }

        let total = writer.finish()?;
        println!(
            "Wrote {} records ({}) to {}",
            writer.frames_written(),
            format_bytes(total),
            self.output.display()
        );
        Ok(())
    }
}
