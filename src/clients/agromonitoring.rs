//! Weather service (AgroMonitoring current-weather API)
//!
//! GET {base}/weather?lat=..&lon=..&appid=.. ; temperatures arrive in Kelvin.

use super::{build_http_client, ClientError, WeatherProvider};
use crate::config::WeatherConfig;
use crate::weather::WeatherReport;
use async_trait::async_trait;
use serde::Deserialize;

const SERVICE: &str = "Weather API";

pub struct AgroMonitoringClient {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl AgroMonitoringClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            client: build_http_client(SERVICE, config.timeout_secs)?,
        })
    }
}

#[derive(Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Option<MainBlock>,
}

#[derive(Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: Option<f64>,
}

/// Convert an AgroMonitoring response body into a report
pub fn parse_weather(raw: &serde_json::Value) -> Result<WeatherReport, ClientError> {
    let parsed: WeatherResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ClientError::Malformed { service: SERVICE, message: e.to_string() })?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .and_then(|c| c.description)
        .unwrap_or_else(|| "Unknown".to_string());
    let kelvin = parsed.main.and_then(|m| m.temp);

    Ok(WeatherReport::from_kelvin(description, kelvin))
}

#[async_trait]
impl WeatherProvider for AgroMonitoringClient {
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, ClientError> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("lat", lat.to_string()), ("lon", lon.to_string()), ("appid", self.api_key.clone())])
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(SERVICE, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("{} HTTP Error: {} - {}", SERVICE, status.as_u16(), body);
            return Err(ClientError::Status { service: SERVICE, status: status.as_u16(), body });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::from_reqwest(SERVICE, self.timeout_secs, e))?;

        parse_weather(&raw)
    }
}
