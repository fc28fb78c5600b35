// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record codec interface.
//!
//! A [`RecordCodec`] owns one record schema: it knows the frame type tag the
//! schema is stored under and converts between [`Record`] values and payload
//! bytes. Frame readers and writers are generic over it.

use crate::core::{Record, Result};

/// Schema-specific conversion between records and frame payloads.
pub trait RecordCodec: Send + Sync {
    /// Frame type tag this codec reads and writes.
    fn type_tag(&self) -> u16;

    /// Human-readable schema name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Encode a record into payload bytes.
    ///
    /// # Errors
    ///
    /// Fails when the record is missing a mandatory field or holds a value
    /// the schema cannot represent.
    fn encode(&self, record: &Record) -> Result<Vec<u8>>;

    /// Decode payload bytes into a record.
    ///
    /// # Errors
    ///
    /// Fails with `MalformedPayload` when the bytes are not a well-formed
    /// message of this schema.
    fn decode(&self, payload: &[u8]) -> Result<Record>;
}
