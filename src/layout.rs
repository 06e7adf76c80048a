//! Column table for the one-line data file
//!
//! Each entry names a column, its zero-indexed, end-exclusive byte span and
//! the setter that stores the decoded value. The decoder walks the table in
//! order; changing the file format means editing this table only.
//!
//! | Column | Bytes | Meaning |
//! |--------|-------|---------|
//! | Date | 0-10 | local date `yyyy-mm-dd` |
//! | Time | 11-22 | local time `hh:mm:ss.ss`, 24 hour clock |
//! | T | 23 | temperature units, `C` or `F` |
//! | V | 25 | wind units, `K` km/h, `M` mph, `m` m/s |
//! | SkyT | 27-32 | sky minus ambient temperature |
//! | AmbT | 34-39 | ambient temperature |
//! | SenT | 40-46 | sensor case temperature |
//! | Wind | 48-53 | wind speed |
//! | Hum | 55-57 | relative humidity % |
//! | DewPt | 59-64 | dew point |
//! | Hea | 66-68 | heater setting % |
//! | R | 70 | rain flag |
//! | W | 72 | wet flag |
//! | Since | 74-79 | seconds since the last valid data |
//! | Now() | 80-92 | VB6 `Now()` days when the file was last written |
//! | c | 93 | cloud condition |
//! | w | 95 | wind condition |
//! | r | 97 | rain condition |
//! | d | 99 | daylight condition |
//! | C | 101 | roof close requested |
//! | A | 103 | alert |

use crate::models::SensorRecord;
use std::ops::Range;

/// How a column is decoded and where the value lands
#[derive(Clone, Copy)]
pub enum Column {
    Char(fn(&mut SensorRecord, char)),
    Float(fn(&mut SensorRecord, f64)),
    Int(fn(&mut SensorRecord, i32)),
}

/// One entry of the column table
#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub range: Range<usize>,
    pub column: Column,
}

impl FieldSpec {
    const fn new(name: &'static str, start: usize, end: usize, column: Column) -> Self {
        Self {
            name,
            range: start..end,
            column,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.column {
            Column::Char(_) => "char",
            Column::Float(_) => "float",
            Column::Int(_) => "int",
        };
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("range", &self.range)
            .field("kind", &kind)
            .finish()
    }
}

/// Every column after the timestamp, in file order
pub const FIELD_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new("temperature_scale", 23, 24, Column::Char(|r, v| r.temperature_scale = v)),
    FieldSpec::new("wind_scale", 25, 26, Column::Char(|r, v| r.wind_scale = v)),
    FieldSpec::new("sky_temp", 27, 32, Column::Float(|r, v| r.sky_temp = v)),
    FieldSpec::new("ambient_temp", 34, 39, Column::Float(|r, v| r.ambient_temp = v)),
    FieldSpec::new("sensor_temp", 40, 46, Column::Float(|r, v| r.sensor_temp = v)),
    FieldSpec::new("wind_speed", 48, 53, Column::Float(|r, v| r.wind_speed = v)),
    FieldSpec::new("humidity", 55, 57, Column::Int(|r, v| r.humidity = v)),
    FieldSpec::new("dew_point", 59, 64, Column::Float(|r, v| r.dew_point = v)),
    FieldSpec::new(
        "dew_heater_percentage",
        66,
        68,
        Column::Int(|r, v| r.dew_heater_percentage = v),
    ),
    FieldSpec::new("rain_flag", 70, 71, Column::Int(|r, v| r.rain_flag = v)),
    FieldSpec::new("wet_flag", 72, 73, Column::Int(|r, v| r.wet_flag = v)),
    FieldSpec::new(
        "seconds_since_good_data",
        74,
        79,
        Column::Int(|r, v| r.seconds_since_good_data = v),
    ),
    FieldSpec::new(
        "days_since_last_write",
        80,
        92,
        Column::Float(|r, v| r.days_since_last_write = v),
    ),
    FieldSpec::new("cloud_condition", 93, 94, Column::Int(|r, v| r.cloud_condition = v.into())),
    FieldSpec::new("wind_condition", 95, 96, Column::Int(|r, v| r.wind_condition = v.into())),
    FieldSpec::new("rain_condition", 97, 98, Column::Int(|r, v| r.rain_condition = v.into())),
    FieldSpec::new(
        "darkness_condition",
        99,
        100,
        Column::Int(|r, v| r.darkness_condition = v.into()),
    ),
    FieldSpec::new(
        "roof_close_requested",
        101,
        102,
        Column::Int(|r, v| r.roof_close_requested = v),
    ),
    FieldSpec::new("alert_condition", 103, 104, Column::Int(|r, v| r.alert_condition = v.into())),
];
