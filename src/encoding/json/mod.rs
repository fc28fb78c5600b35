// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON module.
//!
//! Converts records to and from JSON text.

pub mod codec;

pub use codec::JsonCodec;
