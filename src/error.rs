//! Error handling for sensor line decoding.
//!
//! Only two things can make a decode fail: a line too short to hold the
//! fixed field table, and a timestamp that does not match the strict
//! `YYYY-MM-DD HH:MM:SS.ss` layout. Every other column degrades to zero.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("parsing time \"{input}\": {reason}")]
    Timestamp { input: String, reason: String },

    #[error("sensor line too short: got {len} bytes, need at least {required}")]
    BufferTooShort { len: usize, required: usize },

    #[error("unknown time zone: {name}")]
    UnknownTimezone { name: String },
}

impl DecodeError {
    /// Create a timestamp error from the joined date/time text and a diagnostic
    pub fn timestamp(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Timestamp {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn buffer_too_short(len: usize, required: usize) -> Self {
        Self::BufferTooShort { len, required }
    }

    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        Self::UnknownTimezone { name: name.into() }
    }

    /// True when the failure came from the timestamp columns
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp { .. })
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
