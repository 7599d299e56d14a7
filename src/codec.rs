//! Date and time conversions for the Netro wire format.
//!
//! The service sends timestamps such as `2024-05-01T06:30:00` with no zone
//! suffix. They are UTC. Calendar dates (`2024-05-01`) and times of day
//! (`06:30:00`) are local to the device and are kept naive.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for UTC date-times (no offset suffix).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a zone-less timestamp as a UTC instant.
///
/// Fractional seconds are accepted. A string carrying its own offset
/// (`+02:00`, `Z`) is rejected.
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive: NaiveDateTime = s.parse()?;
    Ok(naive.and_utc())
}

pub fn format_utc(t: &DateTime<Utc>) -> String {
    t.format(DATE_TIME_FORMAT).to_string()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Serde adapter for UTC timestamps encoded without an offset.
///
/// Use with `#[serde(with = "crate::codec::naive_utc")]`.
pub mod naive_utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_utc(t))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_utc(&s).map_err(|e| serde::de::Error::custom(format!("invalid UTC timestamp `{}`: {}", s, e)))
    }
}
