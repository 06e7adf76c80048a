//! Fixed-width decoder for the SkyAlert data line
//!
//! Decoding is strict on the timestamp and lenient everywhere else: a line
//! whose date or time columns do not parse is rejected outright, while a
//! blank or garbled numeric column simply reads as zero.

use crate::config::{DecoderConfig, Location};
use crate::constants::{DATE_RANGE, MIN_RECORD_LEN, TIME_RANGE, TIMESTAMP_FORMAT, TIMESTAMP_SHAPE};
use crate::error::{DecodeError, Result};
use crate::fields::{parse_char, parse_number};
use crate::layout::{Column, FIELD_LAYOUT};
use crate::models::SensorRecord;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use tracing::{debug, trace_span};

/// Decodes sensor lines using a fixed configuration
///
/// Holds no mutable state, so one decoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decoder for a specific zone
    pub fn with_location(location: impl Into<Location>) -> Self {
        Self::new(DecoderConfig::default().with_location(location))
    }

    pub fn location(&self) -> &Location {
        &self.config.location
    }

    /// Decode one raw line. Bytes past the alert column are ignored.
    pub fn decode(&self, raw: &[u8]) -> Result<SensorRecord> {
        decode(raw, &self.config.location)
    }

    pub fn decode_str(&self, line: &str) -> Result<SensorRecord> {
        self.decode(line.as_bytes())
    }
}

/// Decode one raw line, interpreting its timestamp in `location`
pub fn decode(raw: &[u8], location: &Location) -> Result<SensorRecord> {
    let generated_at = Utc::now();

    if raw.len() < MIN_RECORD_LEN {
        return Err(DecodeError::buffer_too_short(raw.len(), MIN_RECORD_LEN));
    }

    let timestamp = parse_timestamp(&raw[DATE_RANGE], &raw[TIME_RANGE], location)?;
    let mut record = SensorRecord::empty(timestamp, generated_at);

    for spec in FIELD_LAYOUT {
        let _column = trace_span!("column", name = spec.name).entered();
        let bytes = &raw[spec.range.clone()];
        match spec.column {
            Column::Char(set) => set(&mut record, parse_char(bytes)),
            Column::Float(set) => set(&mut record, parse_number(bytes)),
            Column::Int(set) => set(&mut record, parse_number(bytes)),
        }
    }

    debug!(
        "Decoded sensor line at {} (cloud={}, rain={}, alert={})",
        record.timestamp, record.cloud_condition, record.rain_condition, record.alert_condition
    );
    Ok(record)
}

/// Join the date and time columns and resolve them in `location`
pub fn parse_timestamp(
    date: &[u8],
    time: &[u8],
    location: &Location,
) -> Result<DateTime<FixedOffset>> {
    let mut joined = Vec::with_capacity(date.len() + 1 + time.len());
    joined.extend_from_slice(date);
    joined.push(b' ');
    joined.extend_from_slice(time);
    let input = String::from_utf8_lossy(&joined).into_owned();

    check_shape(&joined).map_err(|reason| DecodeError::timestamp(&input, reason))?;

    let naive = NaiveDateTime::parse_from_str(&input, TIMESTAMP_FORMAT)
        .map_err(|e| DecodeError::timestamp(&input, e))?;

    // chrono reads second 60 as a leap second; the sensor clock never writes one
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(DecodeError::timestamp(&input, "second out of range"));
    }

    location.localize(&naive).ok_or_else(|| {
        DecodeError::timestamp(&input, format!("local time cannot be placed in {}", location))
    })
}

/// Compare the joined timestamp against `dddd-dd-dd dd:dd:dd.dd`
fn check_shape(joined: &[u8]) -> std::result::Result<(), String> {
    if joined.len() != TIMESTAMP_SHAPE.len() {
        return Err(format!(
            "expected {} characters, found {}",
            TIMESTAMP_SHAPE.len(),
            joined.len()
        ));
    }

    for (position, (&actual, &expected)) in joined.iter().zip(TIMESTAMP_SHAPE.iter()).enumerate() {
        let ok = match expected {
            b'd' => actual.is_ascii_digit(),
            literal => actual == literal,
        };
        if !ok {
            let wanted = if expected == b'd' {
                "a digit".to_string()
            } else {
                format!("{:?}", char::from(expected))
            };
            return Err(format!(
                "expected {} at position {}, found {:?}",
                wanted,
                position,
                char::from(actual)
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    const CHICAGO: Location = Location::Zone(Chicago);

    #[test]
    fn test_parse_timestamp_hundredths() {
        let dt = parse_timestamp(b"2024-06-11", b"14:09:57.25", &CHICAGO).unwrap();
        assert_eq!(dt.timestamp(), 1_718_132_997);
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_day() {
        let err = parse_timestamp(b"2024-06-54", b"14:09:57.00", &CHICAGO).unwrap_err();
        match err {
            DecodeError::Timestamp { input, reason } => {
                assert_eq!(input, "2024-06-54 14:09:57.00");
                assert!(reason.contains("out of range"), "{}", reason);
            }
            other => panic!("Expected Timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_clock() {
        assert!(parse_timestamp(b"2024-06-11", b"25:09:57.00", &CHICAGO).is_err());
        assert!(parse_timestamp(b"2024-06-11", b"14:61:57.00", &CHICAGO).is_err());
        assert!(parse_timestamp(b"2023-02-29", b"14:09:57.00", &CHICAGO).is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_second_60() {
        let err = parse_timestamp(b"2024-06-11", b"14:09:60.00", &CHICAGO).unwrap_err();
        assert_eq!(
            err,
            DecodeError::timestamp("2024-06-11 14:09:60.00", "second out of range")
        );
        assert!(parse_timestamp(b"2024-06-11", b"23:59:60.99", &CHICAGO).is_err());
        assert!(parse_timestamp(b"2024-06-11", b"23:59:59.99", &CHICAGO).is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_wrong_layout() {
        let err = parse_timestamp(b"2024/06/11", b"14:09:57.00", &CHICAGO).unwrap_err();
        assert!(err.to_string().contains("position 4"), "{}", err);

        // single digit fraction padded with a space
        let err = parse_timestamp(b"2024-06-11", b"14:09:57.0 ", &CHICAGO).unwrap_err();
        assert!(err.to_string().contains("position 21"), "{}", err);

        // 12-hour style blank-padded hour
        assert!(parse_timestamp(b"2024-06-11", b" 2:09:57.00", &CHICAGO).is_err());
    }

    #[test]
    fn test_parse_timestamp_dst_transitions() {
        // spring-forward gap moves forward by the hour that was skipped
        let dt = parse_timestamp(b"2024-03-10", b"02:30:00.00", &CHICAGO).unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
        );

        // fall-back overlap resolves to the earlier (CDT) instant
        let dt = parse_timestamp(b"2024-11-03", b"01:30:00.00", &CHICAGO).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_check_shape() {
        assert!(check_shape(b"2024-06-11 14:09:57.00").is_ok());
        assert!(check_shape(b"2024-06-11T14:09:57.00").is_err());
        assert!(check_shape(b"2024-06-11 14:09:57").is_err());
    }

    #[test]
    fn test_decoder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
    }
}
