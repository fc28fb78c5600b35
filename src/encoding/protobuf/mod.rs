// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf record codecs.

pub mod device_apps;

pub use device_apps::{Device, DeviceApps, DeviceAppsCodec};
