//! External collaborators: image classifier and weather service
//!
//! Both are reached over HTTP and sit behind async traits so the server can
//! run against fakes in tests. Neither client retries; a failed call is
//! reported to the caller as a [`ClientError`].

pub mod agromonitoring;
pub mod roboflow;

pub use agromonitoring::AgroMonitoringClient;
pub use roboflow::RoboflowClassifier;

use crate::diagnosis::PredictionCandidate;
use crate::weather::WeatherReport;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{service} request failed: {message}")]
    Transport { service: &'static str, message: String },

    #[error("{service} request timed out after {secs}s")]
    Timeout { service: &'static str, secs: u64 },

    #[error("{service} HTTP Error: {status} - {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} returned a malformed response: {message}")]
    Malformed { service: &'static str, message: String },
}

impl ClientError {
    pub(crate) fn from_reqwest(service: &'static str, timeout_secs: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { service, secs: timeout_secs }
        } else if err.is_decode() {
            ClientError::Malformed { service, message: err.to_string() }
        } else {
            ClientError::Transport { service, message: err.to_string() }
        }
    }
}

/// Classifier output: ranked candidates plus the untouched response body
#[derive(Debug, Clone)]
pub struct Classification {
    pub candidates: Vec<PredictionCandidate>,
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    /// Classify one image; candidates ordered best first
    async fn classify(&self, image: Vec<u8>) -> Result<Classification, ClientError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at (lat, lon)
    async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, ClientError>;
}

pub(crate) fn build_http_client(
    service: &'static str,
    timeout_secs: u64,
) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ClientError::Transport { service, message: e.to_string() })
}
