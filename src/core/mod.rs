// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pbstream.
//!
//! - [`StreamError`] - Error taxonomy for frame streams and record codecs
//! - [`Value`] / [`Record`] - Generic structured value

pub mod error;
pub mod value;

pub use error::{Result, StreamError};
pub use value::{Record, Value};
