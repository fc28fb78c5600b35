// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! DeviceApps protobuf schema and record codec.
//!
//! Wire schema (proto2):
//!
//! ```text
//! message DeviceApps {
//!   message Device {
//!     optional string id = 1;
//!     optional string type = 2;
//!   }
//!   optional Device device = 1;
//!   repeated uint32 apps = 2;
//!   optional double lat = 3;
//!   optional double lon = 4;
//! }
//! ```
//!
//! Record shape:
//!
//! ```text
//! { "device": { "id"?: string, "type"?: string },
//!   "lat"?: float64, "lon"?: float64,
//!   "apps": [uint32, ...] }
//! ```
//!
//! Every optional field is an `Option` on the message types, so a value can
//! never be emitted without its presence bit or the other way around.

use prost::Message;

use crate::core::{Record, Result, StreamError, Value};
use crate::encoding::codec::RecordCodec;
use crate::io::frame::DEVICE_APPS;

const FIELD_DEVICE: &str = "device";
const FIELD_ID: &str = "id";
const FIELD_TYPE: &str = "type";
const FIELD_LAT: &str = "lat";
const FIELD_LON: &str = "lon";
const FIELD_APPS: &str = "apps";

/// Device identity.
#[derive(Clone, PartialEq, Message)]
pub struct Device {
    #[prost(string, optional, tag = "1")]
    pub id: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub r#type: Option<String>,
}

/// A device with its location and installed application ids.
#[derive(Clone, PartialEq, Message)]
pub struct DeviceApps {
    #[prost(message, optional, tag = "1")]
    pub device: Option<Device>,
    #[prost(uint32, repeated, packed = "false", tag = "2")]
    pub apps: Vec<u32>,
    #[prost(double, optional, tag = "3")]
    pub lat: Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub lon: Option<f64>,
}

impl DeviceApps {
    /// Build the message from a record, validating its shape.
    pub fn from_record(record: &Record) -> Result<Self> {
        let device = match record.get(FIELD_DEVICE) {
            Some(Value::Struct(device)) => Device {
                id: optional_string(device, FIELD_ID, "device.id")?,
                r#type: optional_string(device, FIELD_TYPE, "device.type")?,
            },
            Some(other) => {
                return Err(StreamError::type_mismatch(
                    FIELD_DEVICE,
                    "struct",
                    other.type_name(),
                ))
            }
            None => return Err(StreamError::missing_field(FIELD_DEVICE)),
        };

        let apps = match record.get(FIELD_APPS) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| app_id(i, item))
                .collect::<Result<Vec<u32>>>()?,
            Some(other) => {
                return Err(StreamError::type_mismatch(
                    FIELD_APPS,
                    "array",
                    other.type_name(),
                ))
            }
            None => return Err(StreamError::missing_field(FIELD_APPS)),
        };

        Ok(Self {
            device: Some(device),
            apps,
            lat: optional_f64(record, FIELD_LAT)?,
            lon: optional_f64(record, FIELD_LON)?,
        })
    }

    /// Convert the message into a record, emitting only present fields.
    pub fn into_record(self) -> Record {
        let mut device = Record::new();
        if let Some(d) = self.device {
            if let Some(id) = d.id {
                device.insert(FIELD_ID.to_string(), Value::String(id));
            }
            if let Some(ty) = d.r#type {
                device.insert(FIELD_TYPE.to_string(), Value::String(ty));
            }
        }

        let mut record = Record::new();
        record.insert(FIELD_DEVICE.to_string(), Value::Struct(device));
        if let Some(lat) = self.lat {
            record.insert(FIELD_LAT.to_string(), Value::Float64(lat));
        }
        if let Some(lon) = self.lon {
            record.insert(FIELD_LON.to_string(), Value::Float64(lon));
        }
        record.insert(
            FIELD_APPS.to_string(),
            Value::Array(self.apps.into_iter().map(Value::UInt32).collect()),
        );
        record
    }
}

impl TryFrom<&Record> for DeviceApps {
    type Error = StreamError;

    fn try_from(record: &Record) -> Result<Self> {
        Self::from_record(record)
    }
}

impl From<DeviceApps> for Record {
    fn from(msg: DeviceApps) -> Self {
        msg.into_record()
    }
}

fn optional_string(map: &Record, key: &str, path: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StreamError::type_mismatch(path, "string", other.type_name())),
    }
}

fn optional_f64(map: &Record, key: &str) -> Result<Option<f64>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| StreamError::type_mismatch(key, "number", value.type_name())),
    }
}

fn app_id(index: usize, value: &Value) -> Result<u32> {
    let field = || format!("{FIELD_APPS}[{index}]");
    if !value.is_integer() {
        return Err(StreamError::type_mismatch(
            field(),
            "integer",
            value.type_name(),
        ));
    }
    value
        .as_u32()
        .ok_or_else(|| StreamError::out_of_range(field(), value))
}

/// Record codec for DeviceApps frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceAppsCodec;

impl DeviceAppsCodec {
    /// Create a new DeviceApps codec.
    pub fn new() -> Self {
        Self
    }
}

impl RecordCodec for DeviceAppsCodec {
    fn type_tag(&self) -> u16 {
        DEVICE_APPS
    }

    fn name(&self) -> &'static str {
        "DeviceApps"
    }

    fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        Ok(DeviceApps::from_record(record)?.encode_to_vec())
    }

    fn decode(&self, payload: &[u8]) -> Result<Record> {
        DeviceApps::decode(payload)
            .map(DeviceApps::into_record)
            .map_err(|e| StreamError::malformed(self.name(), e.to_string()))
    }
}
