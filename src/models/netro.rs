//! Typed records returned by the Netro public API (NPA v1).
//!
//! Notes
//! - Every struct ignores unknown fields, so additions on the service side do not break decoding.
//! - Zone-less UTC timestamps go through `crate::codec::naive_utc`; local dates and times stay naive.
//! - Integer-coded enums (error codes, event types, request-only status values) are (de)serialized
//!   as their numeric wire value.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::serde_enum_name;

// =====================
// Integer-coded enums
// =====================

/// Implements numeric serde plus `value()` / `TryFrom<i64>` for a fieldless enum.
macro_rules! int_enum {
    ($name:ident, $expecting:literal, { $($variant:ident = $value:literal),+ $(,)? }) => {
        impl $name {
            /// Numeric value used on the wire.
            pub fn value(self) -> i64 {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = i64;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i64(self.value())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct V;
                impl<'de> serde::de::Visitor<'de> for V {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        $name::try_from(value)
                            .map_err(|other| E::invalid_value(serde::de::Unexpected::Signed(other), &self))
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        i64::try_from(value)
                            .ok()
                            .and_then(|v| $name::try_from(v).ok())
                            .ok_or_else(|| E::invalid_value(serde::de::Unexpected::Unsigned(value), &self))
                    }
                }

                deserializer.deserialize_any(V)
            }
        }
    };
}

/// Application error codes reported in an error envelope.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidKey,
    Unknown,
    LimitExceeded,
    InvalidDevice,
    InternalError,
    ParameterError,
}

int_enum!(ErrorCode, "an error code between 1 and 6", {
    InvalidKey = 1,
    Unknown = 2,
    LimitExceeded = 3,
    InvalidDevice = 4,
    InternalError = 5,
    ParameterError = 6,
});

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    DeviceOffline,
    DeviceOnline,
    ScheduleStart,
    ScheduleEnd,
}

int_enum!(EventType, "an event type between 1 and 4", {
    DeviceOffline = 1,
    DeviceOnline = 2,
    ScheduleStart = 3,
    ScheduleEnd = 4,
});

/// Target status accepted by `set_status`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeviceSetStatus {
    Standby,
    Online,
}

int_enum!(DeviceSetStatus, "a device status of 0 or 1", {
    Standby = 0,
    Online = 1,
});

/// Weather condition accepted by `report_weather`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Wind,
}

int_enum!(WeatherCondition, "a weather condition between 0 and 4", {
    Clear = 0,
    Cloudy = 1,
    Rain = 2,
    Snow = 3,
    Wind = 4,
});

// =====================
// String enums
// =====================

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Standby,
    Setup,
    Online,
    Watering,
    Offline,
    Sleeping,
    Poweroff,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serde_enum_name(self).unwrap_or_default())
    }
}

/// Watering decision strategy of a zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneSmart {
    Smart,
    Assistant,
    Timer,
}

impl fmt::Display for ZoneSmart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serde_enum_name(self).unwrap_or_default())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleSource {
    Manual,
    Smart,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Executed,
    Executing,
    Valid,
}

// =====================
// Envelope parts
// =====================

/// Request accounting attached to every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(with = "crate::codec::naive_utc")]
    pub last_active: DateTime<Utc>,
    /// Transaction id.
    pub tid: String,
    /// Server time.
    #[serde(with = "crate::codec::naive_utc")]
    pub time: DateTime<Utc>,
    pub token_limit: i64,
    pub token_remaining: i64,
    #[serde(with = "crate::codec::naive_utc")]
    pub token_reset: DateTime<Utc>,
    /// API version.
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub code: ErrorCode,
    pub message: String,
}

// =====================
// Device and zones
// =====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub enabled: bool,
    /// 1-based zone index.
    pub ith: u32,
    pub name: String,
    pub smart: ZoneSmart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(with = "crate::codec::naive_utc")]
    pub last_active: DateTime<Utc>,
    pub name: String,
    pub serial: String,
    pub status: DeviceStatus,
    pub sw_version: String,
    /// Hardware version.
    pub version: String,
    pub zone_num: u32,
    pub zones: Vec<Zone>,
    /// Only reported by battery powered controllers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
}

impl Device {
    /// Zones in device order, optionally restricted to enabled ones.
    pub fn zones(&self, only_enabled: bool) -> Vec<&Zone> {
        self.zones.iter().filter(|z| z.enabled || !only_enabled).collect()
    }

    pub fn zone(&self, ith: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.ith == ith)
    }
}

/// Payload of the `info` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoData {
    pub device: Device,
}

// =====================
// Schedules
// =====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub zone: u32,
    pub source: ScheduleSource,
    pub status: ScheduleStatus,
    #[serde(with = "crate::codec::naive_utc")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::codec::naive_utc")]
    pub end_time: DateTime<Utc>,
    pub local_date: NaiveDate,
    pub local_start_time: NaiveTime,
    pub local_end_time: NaiveTime,
}

impl Schedule {
    /// Watering length, `end_time - start_time`. Never sent by the service.
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    pub schedules: Vec<Schedule>,
}

impl ScheduleData {
    pub fn for_zone(&self, zone: u32) -> Vec<&Schedule> {
        self.schedules.iter().filter(|s| s.zone == zone).collect()
    }
}

// =====================
// Moistures
// =====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moisture {
    pub id: i64,
    pub zone: u32,
    pub date: NaiveDate,
    pub moisture: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoistureData {
    pub moistures: Vec<Moisture>,
}

impl MoistureData {
    pub fn for_zone(&self, zone: u32) -> Vec<&Moisture> {
        self.moistures.iter().filter(|m| m.zone == zone).collect()
    }
}

// =====================
// Events
// =====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub event: EventType,
    pub message: String,
    #[serde(with = "crate::codec::naive_utc")]
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub events: Vec<Event>,
}

impl EventData {
    pub fn of_type(&self, event: EventType) -> Vec<&Event> {
        self.events.iter().filter(|e| e.event == event).collect()
    }
}

// =====================
// Sensor readings
// =====================

/// One sample from a soil sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: i64,
    #[serde(with = "crate::codec::naive_utc")]
    pub time: DateTime<Utc>,
    pub local_date: NaiveDate,
    pub local_time: NaiveTime,
    pub moisture: i64,
    pub sunlight: i64,
    pub celsius: f64,
    pub fahrenheit: f64,
    pub battery_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub sensor_data: Vec<SensorReading>,
}

// =====================
// Request payloads
// =====================

/// Local weather observation pushed through `report_weather`.
///
/// Numeric fields that are `None` or zero are left out of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub date: NaiveDate,
    pub condition: Option<WeatherCondition>,
    /// Rainfall in mm.
    pub rain: Option<f64>,
    /// Rain probability, 0-100.
    pub rain_prob: Option<f64>,
    pub temp: Option<f64>,
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
    pub t_dew: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

impl WeatherReport {
    pub fn new(date: NaiveDate) -> Self {
        WeatherReport {
            date,
            condition: None,
            rain: None,
            rain_prob: None,
            temp: None,
            t_min: None,
            t_max: None,
            t_dew: None,
            wind_speed: None,
            humidity: None,
            pressure: None,
        }
    }
}
