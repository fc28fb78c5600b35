// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Example command - serialize the demonstration record.

use std::io::{self, Write};

use clap::Args;

use crate::common::{example_record, Result};
use pbstream::{DeviceAppsCodec, RecordCodec};

/// Write the serialized demonstration record to stdout.
#[derive(Args, Clone, Debug)]
pub struct ExampleCmd {
    /// Print the payload as hex instead of raw bytes
    #[arg(long)]
    hex: bool,
}

impl ExampleCmd {
    pub fn run(self) -> Result<()> {
        let payload = DeviceAppsCodec::new().encode(&example_record())?;

        let mut out = io::stdout().lock();
        if self.hex {
            writeln!(out, "{}", hex::encode(&payload))?;
        } else {
            out.write_all(&payload)?;
        }
        out.flush()?;

        eprintln!("Serialized DeviceApps: {} bytes", payload.len());
        Ok(())
    }
}
