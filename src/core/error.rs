// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pbstream.
//!
//! Covers every way a frame stream operation can fail:
//! - Opening the compressed transport
//! - Frame boundaries (truncated header/payload, bad magic)
//! - Payload decoding
//! - Record validation before encoding

use thiserror::Error;

/// Errors that can occur while reading or writing frame streams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The compressed stream could not be opened or created
    #[error("Failed to open '{path}': {message}")]
    OpenError {
        /// Path that was being opened
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Stream ended inside a frame header
    #[error("Truncated frame header: got {available} of 8 bytes")]
    TruncatedHeader {
        /// Bytes that were available before the stream ended
        available: usize,
    },

    /// Stream ended inside a frame payload
    #[error("Truncated frame payload: header declares {expected} bytes, only {available} available")]
    TruncatedPayload {
        /// Length declared by the header
        expected: usize,
        /// Bytes actually read
        available: usize,
    },

    /// Frame header does not start with the magic sentinel
    #[error("Corrupt frame: bad magic 0x{magic:08X}")]
    CorruptFrame {
        /// Magic value found in the header
        magic: u32,
    },

    /// Payload bytes do not parse as a record of the expected schema
    #[error("Malformed {codec} payload: {message}")]
    MalformedPayload {
        /// Codec that rejected the payload
        codec: String,
        /// Error message
        message: String,
    },

    /// A mandatory field is absent from the record
    #[error("Missing field '{field}'")]
    MissingField {
        /// Field path
        field: String,
    },

    /// A field is present but holds the wrong kind of value
    #[error("Field '{field}' should be {expected}, got {actual}")]
    TypeMismatch {
        /// Field path
        field: String,
        /// Expected kind of value
        expected: String,
        /// Type name of the value found
        actual: String,
    },

    /// A numeric field does not fit the target type
    #[error("Value {value} of field '{field}' is out of range")]
    ValueOutOfRange {
        /// Field path
        field: String,
        /// Offending value, rendered
        value: String,
    },

    /// Encoded payload does not fit into the header's length field
    #[error("Payload length {length} exceeds maximum frame payload of {max} bytes")]
    InvalidLength {
        /// Encoded payload length
        length: usize,
        /// Largest representable length
        max: usize,
    },

    /// I/O failure on an already open stream
    #[error("I/O error in {context}: {message}")]
    Io {
        /// Operation that failed
        context: String,
        /// Error message
        message: String,
    },
}

impl StreamError {
    /// Create an open error.
    pub fn open(path: impl Into<String>, message: impl Into<String>) -> Self {
        StreamError::OpenError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a truncated header error.
    pub fn truncated_header(available: usize) -> Self {
        StreamError::TruncatedHeader { available }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(expected: usize, available: usize) -> Self {
        StreamError::TruncatedPayload {
            expected,
            available,
        }
    }

    /// Create a corrupt frame error.
    pub fn corrupt_frame(magic: u32) -> Self {
        StreamError::CorruptFrame { magic }
    }

    /// Create a malformed payload error.
    pub fn malformed(codec: impl Into<String>, message: impl Into<String>) -> Self {
        StreamError::MalformedPayload {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        StreamError::MissingField {
            field: field.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        StreamError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a value out of range error.
    pub fn out_of_range(field: impl Into<String>, value: impl ToString) -> Self {
        StreamError::ValueOutOfRange {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create an invalid length error.
    pub fn invalid_length(length: usize, max: usize) -> Self {
        StreamError::InvalidLength { length, max }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, err: impl ToString) -> Self {
        StreamError::Io {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error was caused by the stream ending inside a frame.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            StreamError::TruncatedHeader { .. } | StreamError::TruncatedPayload { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            StreamError::OpenError { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            StreamError::TruncatedHeader { available } => {
                vec![("available", available.to_string())]
            }
            StreamError::TruncatedPayload {
                expected,
                available,
            } => vec![
                ("expected", expected.to_string()),
                ("available", available.to_string()),
            ],
            StreamError::CorruptFrame { magic } => vec![("magic", format!("0x{magic:08X}"))],
            StreamError::MalformedPayload { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            StreamError::MissingField { field } => vec![("field", field.clone())],
            StreamError::TypeMismatch {
                field,
                expected,
                actual,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.clone()),
                ("actual", actual.clone()),
            ],
            StreamError::ValueOutOfRange { field, value } => {
                vec![("field", field.clone()), ("value", value.clone())]
            }
            StreamError::InvalidLength { length, max } => {
                vec![("length", length.to_string()), ("max", max.to_string())]
            }
            StreamError::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
        }
    }
}

/// Result type for pbstream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
