//! SkyAlert Decoder Library
//!
//! Decodes the one-line data file written by Boltwood II compatible cloud
//! sensors (the Interactive Astronomy SkyAlert among them) into a typed
//! [`SensorRecord`].
//!
//! The line is fixed width: every column sits at an absolute byte offset.
//! Decoding is a single synchronous pass over an in-memory buffer:
//! - the date and time columns are parsed strictly and resolved in a
//!   configurable time zone; any failure rejects the line
//! - numeric columns are trimmed of spaces and read as zero when blank or
//!   malformed
//! - condition columns map onto per-axis enums, keeping unknown numerals
//!
//! ```rust
//! use skyalert::{Decoder, Location};
//!
//! let line = "2024-06-11 14:09:57.00 F M 79.6   92.8  93      0      42  66.3   000 1 1 00019 045454.59025 3 1 1 1 1 1";
//! let decoder = Decoder::with_location("America/Chicago".parse::<Location>()?);
//! let record = decoder.decode_str(line)?;
//!
//! assert_eq!(record.humidity, 42);
//! assert!(record.is_roof_close_requested());
//! # Ok::<(), skyalert::DecodeError>(())
//! ```
//!
//! Reading the file, polling it for changes and acting on the record are
//! left to the caller.

pub mod cli;
pub mod conditions;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod fields;
pub mod layout;
pub mod models;

// Re-export commonly used types
pub use conditions::{
    AlertCondition, CloudCondition, DarknessCondition, RainCondition, WindCondition,
};
pub use config::{DecoderConfig, Location};
pub use decoder::{Decoder, decode};
pub use error::{DecodeError, Result};
pub use models::SensorRecord;
