//! Blocking HTTP client for the Netro public API (NPA v1).
//!
//! - Blocking client using `ureq` (no async).
//! - Uses the models in `crate::models::netro` and the envelope decoder in `crate::envelope`.
//! - Covers every documented endpoint: device info and status, schedules, moistures,
//!   events, watering commands, weather reports and sensor data.
//!
//! Authentication
//! - The API key travels as the `key` field: in the query string for GET, in the JSON body for POST.
//!
//! No retries and no caching. Each method performs exactly one request.

use chrono::{DateTime, NaiveDate, Utc};
use http::Method;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::{self, Ack, Envelope, Response};
use crate::error::NetroClientError;
use crate::models::netro::*;
use crate::request::{ApiRequest, KEY_PARAM};
use crate::utils::redact;

const USER_AGENT: &str = concat!(
    "netro-client/",
    env!("CARGO_PKG_VERSION"),
    " (git ",
    env!("BUILD_TIME_GIT_HASH"),
    ")"
);

/// Client handle. Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct NetroClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl NetroClient {
    /// Client for the public API with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Client owning a fresh agent built from `config`.
    pub fn from_config(config: ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self::with_agent(agent, config)
    }

    /// Client sharing an externally configured agent. `config.timeout` is not applied.
    pub fn with_agent(agent: ureq::Agent, config: ClientConfig) -> Self {
        NetroClient {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}/{}", self.base_url, request.endpoint().path())
    }

    fn send(&self, request: &ApiRequest) -> Result<Value, NetroClientError> {
        let url = self.url(request);

        // ApiRequest is only ever GET or POST
        let result = if *request.method() == Method::GET {
            let mut req = self
                .agent
                .get(&url)
                .header("Content-Type", "application/json")
                .header("User-Agent", USER_AGENT)
                .query(KEY_PARAM, &self.api_key);
            for (k, v) in request.params().to_query() {
                req = req.query(k, v);
            }
            req.call()
        } else {
            let mut body = request.params().to_body();
            body.insert(KEY_PARAM.to_string(), Value::String(self.api_key.clone()));
            let payload = serde_json::to_string(&body)?;
            self.agent
                .post(&url)
                .header("Accept", "application/json")
                .header("User-Agent", USER_AGENT)
                .content_type("application/json")
                .send(payload.as_bytes())
        };

        let mut res = result?;
        let status = res.status();
        if !status.is_success() {
            let body = res
                .body_mut()
                .read_to_string()
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(NetroClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Untyped passthrough: the decoded JSON of any request.
    ///
    /// Still fails with [`NetroClientError::Api`] when the service answers with an error envelope.
    pub fn call_raw(&self, request: &ApiRequest) -> Result<Value, NetroClientError> {
        debug!("{} {}", request.method(), request.endpoint());
        let result = self.send(request).and_then(|raw| {
            envelope::check(&raw)?;
            Ok(raw)
        });
        if let Err(e) = &result {
            log_failure(request, e);
        }
        result
    }

    /// Typed dispatch: run `request` and decode `data` as `T`.
    pub fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<Response<T>, NetroClientError> {
        let raw = self.call_raw(request)?;
        let result = envelope::decode::<T>(raw).and_then(Envelope::into_result);
        if let Err(e) = &result {
            log_failure(request, e);
        }
        result
    }

    // Device

    pub fn get_info(&self) -> Result<Response<InfoData>, NetroClientError> {
        self.call(&ApiRequest::info())
    }

    pub fn set_device_status(&self, status: DeviceSetStatus) -> Result<Ack, NetroClientError> {
        self.call(&ApiRequest::set_status(status))
    }

    // Schedules

    pub fn get_schedules(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        zones: Option<&[u32]>,
    ) -> Result<Response<ScheduleData>, NetroClientError> {
        self.call(&ApiRequest::schedules(start_date, end_date, zones))
    }

    /// Create a watering schedule. `start_time` is sent as UTC without offset.
    pub fn set_schedule(
        &self,
        zones: Option<&[u32]>,
        duration: u32,
        delay: Option<u32>,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Response<ScheduleData>, NetroClientError> {
        self.call(&ApiRequest::water(duration, zones, delay, start_time))
    }

    // Moistures

    pub fn get_moistures(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        zones: Option<&[u32]>,
    ) -> Result<Response<MoistureData>, NetroClientError> {
        self.call(&ApiRequest::moistures(start_date, end_date, zones))
    }

    /// Override the measured moisture (percent) of `zones`.
    ///
    /// Sent as a `water` action; the service answers without a moisture list, so only the acknowledgement is returned.
    pub fn set_moisture(&self, moisture: u32, zones: Option<&[u32]>) -> Result<Ack, NetroClientError> {
        self.call(&ApiRequest::set_moisture(moisture, zones))
    }

    // Events

    pub fn get_events(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        event: Option<EventType>,
    ) -> Result<Response<EventData>, NetroClientError> {
        self.call(&ApiRequest::events(start_date, end_date, event))
    }

    // Water

    /// Water `zones` (all zones when `None`) for `duration` minutes.
    pub fn water(
        &self,
        duration: u32,
        zones: Option<&[u32]>,
        delay: Option<u32>,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Response<ScheduleData>, NetroClientError> {
        self.call(&ApiRequest::water(duration, zones, delay, start_time))
    }

    /// Same `water` action, without delay or start time.
    pub fn water_as_schedule(
        &self,
        zones: Option<&[u32]>,
        duration: u32,
    ) -> Result<Response<ScheduleData>, NetroClientError> {
        self.set_schedule(zones, duration, None, None)
    }

    pub fn stop_water(&self) -> Result<Ack, NetroClientError> {
        self.call(&ApiRequest::stop_water())
    }

    /// Suspend watering for `days` days.
    pub fn no_water(&self, days: Option<u32>) -> Result<Ack, NetroClientError> {
        self.call(&ApiRequest::no_water(days))
    }

    // Weather

    pub fn report_weather(&self, report: &WeatherReport) -> Result<Ack, NetroClientError> {
        self.call(&ApiRequest::report_weather(report))
    }

    // Sensors

    pub fn get_sensor_data(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> Result<Response<SensorData>, NetroClientError> {
        self.call(&ApiRequest::sensor_data(from_date, to_date))
    }
}

fn log_failure(request: &ApiRequest, e: &NetroClientError) {
    match e {
        NetroClientError::Api { .. } => warn!("{} {} rejected: {}", request.method(), request.endpoint(), e),
        _ => error!("{} {} failed: {}", request.method(), request.endpoint(), e),
    }
}

impl std::fmt::Debug for NetroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetroClient")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish_non_exhaustive()
    }
}
