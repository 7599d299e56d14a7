//! Network-free description of every Netro operation.
//!
//! An [`ApiRequest`] names the HTTP method, the endpoint and the parameters
//! of a call. The client renders the parameters into a query string (GET) or
//! a JSON body (POST) and adds the API key. Absent optional values never make
//! it into `Params`, so they are omitted on the wire rather than sent as null.

use chrono::{DateTime, NaiveDate, Utc};
use http::Method;
use serde_json::{Map, Value};
use std::fmt;

use crate::codec::{format_date, format_utc};
use crate::models::netro::{DeviceSetStatus, EventType, WeatherReport};

/// Name of the request field carrying the API key.
pub const KEY_PARAM: &str = "key";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Info,
    SetStatus,
    Schedules,
    Water,
    Moistures,
    Events,
    StopWater,
    NoWater,
    ReportWeather,
    SensorData,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Info => "info",
            Endpoint::SetStatus => "set_status",
            Endpoint::Schedules => "schedules",
            Endpoint::Water => "water",
            Endpoint::Moistures => "moistures",
            Endpoint::Events => "events",
            Endpoint::StopWater => "stop_water",
            Endpoint::NoWater => "no_water",
            Endpoint::ReportWeather => "report_weather",
            Endpoint::SensorData => "sensor_data",
        }
    }

    /// Path relative to the API base, e.g. `info.json`.
    pub fn path(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(&'static str, Value)>);

impl Params {
    pub fn new() -> Self {
        Params(Vec::new())
    }

    pub fn set(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.0.retain(|(k, _)| *k != name);
        self.0.push((name, value.into()));
        self
    }

    pub fn set_opt<V: Into<Value>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    /// Zone list; omitted when absent or empty.
    pub fn zones(self, zones: Option<&[u32]>) -> Self {
        match zones {
            Some(z) if !z.is_empty() => self.set("zones", z.to_vec()),
            _ => self,
        }
    }

    pub fn date(self, name: &'static str, date: Option<NaiveDate>) -> Self {
        self.set_opt(name, date.map(format_date))
    }

    pub fn date_time(self, name: &'static str, at: Option<DateTime<Utc>>) -> Self {
        self.set_opt(name, at.map(|t| format_utc(&t)))
    }

    /// Numeric value; omitted when absent or zero.
    pub fn nonzero_u32(self, name: &'static str, value: Option<u32>) -> Self {
        self.set_opt(name, value.filter(|v| *v != 0))
    }

    /// Float value; omitted when absent or zero.
    pub fn nonzero_f64(self, name: &'static str, value: Option<f64>) -> Self {
        self.set_opt(name, value.filter(|v| *v != 0.0))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query string pairs. Strings go out verbatim, everything else as compact JSON.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        self.0
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (*k, rendered)
            })
            .collect()
    }

    pub fn to_body(&self) -> Map<String, Value> {
        self.0.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }
}

/// One call against the Netro API, minus the API key.
///
/// Only [`ApiRequest::get`] and [`ApiRequest::post`] build one, so the method is always GET or POST.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    endpoint: Endpoint,
    params: Params,
}

impl ApiRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn get(endpoint: Endpoint, params: Params) -> Self {
        ApiRequest {
            method: Method::GET,
            endpoint,
            params,
        }
    }

    pub fn post(endpoint: Endpoint, params: Params) -> Self {
        ApiRequest {
            method: Method::POST,
            endpoint,
            params,
        }
    }

    pub fn info() -> Self {
        Self::get(Endpoint::Info, Params::new())
    }

    pub fn set_status(status: DeviceSetStatus) -> Self {
        Self::post(Endpoint::SetStatus, Params::new().set("status", status.value()))
    }

    pub fn schedules(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>, zones: Option<&[u32]>) -> Self {
        Self::get(Endpoint::Schedules, date_range(start_date, end_date).zones(zones))
    }

    /// Watering request. Shared by `water`, `set_schedule` and `water_as_schedule`.
    pub fn water(
        duration: u32,
        zones: Option<&[u32]>,
        delay: Option<u32>,
        start_time: Option<DateTime<Utc>>,
    ) -> Self {
        let params = Params::new()
            .set("duration", duration)
            .zones(zones)
            .nonzero_u32("delay", delay)
            .date_time("start_time", start_time);
        Self::post(Endpoint::Water, params)
    }

    pub fn moistures(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>, zones: Option<&[u32]>) -> Self {
        Self::get(Endpoint::Moistures, date_range(start_date, end_date).zones(zones))
    }

    /// Moisture override. Goes through the `water` action, like every other zone command.
    pub fn set_moisture(moisture: u32, zones: Option<&[u32]>) -> Self {
        Self::post(Endpoint::Water, Params::new().set("moisture", moisture).zones(zones))
    }

    pub fn events(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>, event: Option<EventType>) -> Self {
        let params = date_range(start_date, end_date).set_opt("event", event.map(EventType::value));
        Self::get(Endpoint::Events, params)
    }

    pub fn stop_water() -> Self {
        Self::post(Endpoint::StopWater, Params::new())
    }

    pub fn no_water(days: Option<u32>) -> Self {
        Self::post(Endpoint::NoWater, Params::new().set_opt("days", days))
    }

    pub fn report_weather(report: &WeatherReport) -> Self {
        let params = Params::new()
            .set("date", format_date(report.date))
            .set_opt("condition", report.condition.map(|c| c.value()))
            .nonzero_f64("rain", report.rain)
            .nonzero_f64("rain_prob", report.rain_prob)
            .nonzero_f64("temp", report.temp)
            .nonzero_f64("t_min", report.t_min)
            .nonzero_f64("t_max", report.t_max)
            .nonzero_f64("t_dew", report.t_dew)
            .nonzero_f64("wind_speed", report.wind_speed)
            .nonzero_f64("humidity", report.humidity)
            .nonzero_f64("pressure", report.pressure);
        Self::post(Endpoint::ReportWeather, params)
    }

    pub fn sensor_data(from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        let params = Params::new().date("from_date", from_date).date("to_date", to_date);
        Self::get(Endpoint::SensorData, params)
    }
}

fn date_range(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Params {
    Params::new().date("start_date", start_date).date("end_date", end_date)
}
