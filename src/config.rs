//! Decoder configuration.
//!
//! The only setting is the time zone the sensor's local timestamps are
//! interpreted in. Most installs run the decoder on a machine in the same
//! rack as the sensor, so the default is the process's own zone, captured
//! once when the configuration is built.

use crate::error::{DecodeError, Result};
use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Time zone used to interpret the date and time columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Location {
    /// Whatever zone the operating system reports for this process
    #[default]
    Local,
    /// A named IANA zone such as `America/Chicago`
    Zone(Tz),
}

impl Location {
    /// Resolve the process zone once: a valid `TZ` variable wins, then the
    /// zone the operating system is configured with. Only when neither names
    /// an IANA zone does this fall back to chrono's `Local`.
    pub fn system() -> Self {
        let tz_var = std::env::var("TZ").ok();
        let os_zone = match iana_time_zone::get_timezone() {
            Ok(name) => Some(name),
            Err(e) => {
                debug!("Could not read the system time zone: {}", e);
                None
            }
        };
        Self::from_system_names(tz_var.as_deref(), os_zone.as_deref())
    }

    fn from_system_names(tz_var: Option<&str>, os_zone: Option<&str>) -> Self {
        let candidates = [("TZ", tz_var), ("system", os_zone)];
        for (source, name) in candidates {
            let Some(name) = name else { continue };
            match name.trim_start_matches(':').parse::<Tz>() {
                Ok(tz) => {
                    debug!("Using time zone {} from {}", tz.name(), source);
                    return Location::Zone(tz);
                }
                Err(_) => debug!("{} zone {:?} is not an IANA name", source, name),
            }
        }
        debug!("Falling back to local time");
        Location::Local
    }

    /// Attach this zone to a naive local date-time
    pub fn resolve(&self, naive: &NaiveDateTime) -> LocalResult<DateTime<FixedOffset>> {
        match self {
            Location::Local => Local
                .from_local_datetime(naive)
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
            Location::Zone(tz) => tz
                .from_local_datetime(naive)
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
        }
    }

    /// The instant `utc`, expressed in this zone
    pub fn from_utc(&self, utc: &NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Location::Local => {
                let dt = Local.from_utc_datetime(utc);
                dt.with_timezone(&dt.offset().fix())
            }
            Location::Zone(tz) => {
                let dt = tz.from_utc_datetime(utc);
                dt.with_timezone(&dt.offset().fix())
            }
        }
    }

    /// Place a wall-clock reading in this zone. A repeated fall-back time
    /// takes the earlier instant. A time inside a spring-forward gap is read
    /// with the offset in effect before the transition, which moves it
    /// forward by the size of the gap.
    pub fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self.resolve(naive) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => {
                let day_before = naive.checked_sub_signed(TimeDelta::days(1))?;
                let offset = self.resolve(&day_before).earliest()?.offset().local_minus_utc();
                let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset)))?;
                Some(self.from_utc(&utc))
            }
        }
    }
}

impl From<Tz> for Location {
    fn from(tz: Tz) -> Self {
        Location::Zone(tz)
    }
}

impl FromStr for Location {
    type Err = DecodeError;

    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("local") {
            return Ok(Location::Local);
        }
        name.parse::<Tz>()
            .map(Location::Zone)
            .map_err(|_| DecodeError::unknown_timezone(name))
    }
}

impl TryFrom<String> for Location {
    type Error = DecodeError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local => f.write_str("Local"),
            Location::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Zone the sensor clock is set to
    pub location: Location,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            location: Location::system(),
        }
    }
}

impl DecoderConfig {
    /// Interpret timestamps in a zone other than the process's own
    pub fn with_location(mut self, location: impl Into<Location>) -> Self {
        self.location = location.into();
        self
    }

    /// Same as [`with_location`](Self::with_location) but from a zone name
    pub fn with_timezone_name(self, name: &str) -> Result<Self> {
        let location = name.parse::<Location>()?;
        Ok(self.with_location(location))
    }
}
