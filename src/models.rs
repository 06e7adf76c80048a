//! Decoded sensor record.

use crate::conditions::{
    AlertCondition, CloudCondition, DarknessCondition, RainCondition, WindCondition,
};
use crate::constants::roof_codes;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One line of SkyAlert output, decoded.
///
/// Sample line, as written by a unit sitting on a server rack:
///
/// ```text
/// 2024-06-11 14:09:57.00 F M 79.6   92.8  93      0      42  66.3   000 1 1 00019 045454.59025 3 1 1 1 1 1
/// ```
///
/// Temperatures and wind speed are in whatever units the sensor reports in
/// `temperature_scale` / `wind_scale`; nothing is converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Local time of the reading, carrying the offset of the configured zone
    pub timestamp: DateTime<FixedOffset>,
    /// `C` or `F`
    pub temperature_scale: char,
    /// `K` km/h, `M` mph, `m` m/s
    pub wind_scale: char,
    /// Sky minus ambient temperature
    pub sky_temp: f64,
    pub ambient_temp: f64,
    /// Sensor case temperature
    pub sensor_temp: f64,
    pub wind_speed: f64,
    /// Relative humidity in percent
    pub humidity: i32,
    pub dew_point: f64,
    /// Dew heater setting in percent
    pub dew_heater_percentage: i32,
    /// 0 dry, 1 rain in the last minute, 2 raining now
    pub rain_flag: i32,
    /// 0 dry, 1 wet in the last minute, 2 wet now
    pub wet_flag: i32,
    pub seconds_since_good_data: i32,
    /// VB6 `Now()` value (days since 1899-12-30) from when the sensor
    /// software last wrote the file
    pub days_since_last_write: f64,
    pub cloud_condition: CloudCondition,
    pub wind_condition: WindCondition,
    pub rain_condition: RainCondition,
    pub darkness_condition: DarknessCondition,
    /// 0 not requested, 1 close requested
    pub roof_close_requested: i32,
    pub alert_condition: AlertCondition,

    /// When this record was decoded
    #[serde(skip)]
    pub generated_at: DateTime<Utc>,
}

impl SensorRecord {
    /// Record with the given timestamp and every measured column zeroed
    pub(crate) fn empty(timestamp: DateTime<FixedOffset>, generated_at: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            temperature_scale: '\0',
            wind_scale: '\0',
            sky_temp: 0.0,
            ambient_temp: 0.0,
            sensor_temp: 0.0,
            wind_speed: 0.0,
            humidity: 0,
            dew_point: 0.0,
            dew_heater_percentage: 0,
            rain_flag: 0,
            wet_flag: 0,
            seconds_since_good_data: 0,
            days_since_last_write: 0.0,
            cloud_condition: CloudCondition::default(),
            wind_condition: WindCondition::default(),
            rain_condition: RainCondition::default(),
            darkness_condition: DarknessCondition::default(),
            roof_close_requested: 0,
            alert_condition: AlertCondition::default(),
            generated_at,
        }
    }

    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp.with_timezone(&Utc)
    }

    pub fn is_roof_close_requested(&self) -> bool {
        self.roof_close_requested == roof_codes::CLOSE_REQUESTED
    }

    pub fn is_alerting(&self) -> bool {
        self.alert_condition.is_alerting()
    }

    /// Neither an alert nor a roof close request is raised
    pub fn is_safe(&self) -> bool {
        !self.is_alerting() && !self.is_roof_close_requested()
    }

    /// Fields equal, ignoring `generated_at`
    pub fn same_reading(&self, other: &Self) -> bool {
        Self {
            generated_at: other.generated_at,
            ..self.clone()
        } == *other
    }
}
