// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record encoding/decoding implementations.
//!
//! - [`codec`] - The [`RecordCodec`] interface frame readers and writers use
//! - [`protobuf`] - Protobuf record codecs (DeviceApps)
//! - [`json`] - JSON conversion for records

pub mod codec;
pub mod json;
pub mod protobuf;

pub use codec::RecordCodec;
pub use json::JsonCodec;
pub use protobuf::{DeviceApps, DeviceAppsCodec};
