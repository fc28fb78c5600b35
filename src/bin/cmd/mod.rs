// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod example;
mod inspect;
mod read;
mod write;

pub use example::ExampleCmd;
pub use inspect::InspectCmd;
pub use read::ReadCmd;
pub use write::WriteCmd;
