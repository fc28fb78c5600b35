// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Read command - print records as JSON lines.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::common::Result;
use pbstream::io::reader::ReaderBuilder;
use pbstream::JsonCodec;

/// Print DeviceApps records as JSON lines.
#[derive(Args, Clone, Debug)]
pub struct ReadCmd {
    /// Input stream file
    #[arg(value_name = "INPUT.pb.gz")]
    input: PathBuf,

    /// Pretty-print each record
    #[arg(long)]
    pretty: bool,

    /// Stop after this many records
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Accept frames whose magic sentinel is wrong
    #[arg(long)]
    no_verify_magic: bool,
}

impl ReadCmd {
    pub fn run(self) -> Result<()> {
        let reader = ReaderBuilder::new()
            .path(&self.input)
            .verify_magic(!self.no_verify_magic)
            .build()?;
        let json = JsonCodec::new();

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        let limit = self.limit.unwrap_or(usize::MAX);
        let mut written = 0usize;
        for record in reader.take(limit) {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_truncation() => {
                    out.flush()?;
                    return Err(e)
                        .with_context(|| format!("Stream truncated after {written} records"));
                }
                Err(e) => return Err(e.into()),
            };
            let line = json.encode(&record, self.pretty)?;
            writeln!(out, "{line}")?;
            written += 1;
        }

        out.flush()?;
        Ok(())
    }
}
