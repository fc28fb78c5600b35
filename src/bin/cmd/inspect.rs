// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - list raw frames.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::common::{format_bytes, parse_type_tag, Result};
use pbstream::io::reader::ReaderBuilder;
use pbstream::TypeFilter;

/// List raw frames with offsets, type tags and lengths.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Input stream file
    #[arg(value_name = "INPUT.pb.gz")]
    input: PathBuf,

    /// Only list frames of these type tags (decimal or 0x hex, repeatable)
    #[arg(short = 't', long = "type", value_name = "TAG", value_parser = parse_type_tag)]
    type_tags: Vec<u16>,

    /// Hide frames of these type tags (repeatable)
    #[arg(long = "skip-type", value_name = "TAG", value_parser = parse_type_tag)]
    skip_tags: Vec<u16>,

    /// Accept frames whose magic sentinel is wrong
    #[arg(long)]
    no_verify_magic: bool,

    /// Dump each payload as hex
    #[arg(long)]
    hex: bool,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let filter = TypeFilter::from_lists(self.type_tags, self.skip_tags);
        let mut reader = ReaderBuilder::new()
            .path(&self.input)
            .verify_magic(!self.no_verify_magic)
            .filter(filter)
            .build_raw()?;

        println!("=== {} ===", self.input.display());
        println!("{:>12}  {:>6}  {:>6}  magic", "offset", "type", "length");

        loop {
            let frame = match reader.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) if e.is_truncation() => {
                    let at = reader.position();
                    return Err(e).with_context(|| format!("Stream truncated near offset {at}"));
                }
                Err(e) => return Err(e.into()),
            };
            let magic = if frame.header.has_valid_magic() {
                "ok".to_string()
            } else {
                format!("0x{:08X}", frame.header.magic)
            };
            println!(
                "{:>12}  {:>6}  {:>6}  {}",
                frame.offset,
                frame.type_tag(),
                frame.header.length,
                magic
            );
            if self.hex {
                println!("  {}", hex::encode(&frame.payload));
            }
        }

        println!();
        println!("Frames: {}", reader.frames_read());
        println!("Skipped: {}", reader.frames_skipped());
        println!("Size: {}", format_bytes(reader.position()));
        Ok(())
    }
}
