//! Hosted plant-disease classifier (Roboflow inference API)
//!
//! POST {base}/{model_id}/{version}?api_key=... with the image as multipart
//! field `file`. Response: `{"predictions": [{"class": ..., "confidence": ...}, ...]}`.

use super::{build_http_client, Classification, ClientError, DiseaseClassifier};
use crate::config::ClassifierConfig;
use crate::diagnosis::{PredictionCandidate, NO_PREDICTION_LABEL};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

const SERVICE: &str = "Roboflow API";

pub struct RoboflowClassifier {
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl RoboflowClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: format!(
                "{}/{}/{}",
                config.base_url.trim_end_matches('/'),
                config.model_id,
                config.model_version
            ),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            client: build_http_client(SERVICE, config.timeout_secs)?,
        })
    }
}

#[derive(Deserialize)]
struct RoboflowResponse {
    #[serde(default)]
    predictions: Vec<RoboflowPrediction>,
}

#[derive(Deserialize)]
struct RoboflowPrediction {
    class: Option<String>,
    confidence: Option<f64>,
}

/// Extract ranked candidates from a Roboflow response body
pub fn parse_predictions(raw: &serde_json::Value) -> Result<Vec<PredictionCandidate>, ClientError> {
    let parsed: RoboflowResponse = serde_json::from_value(raw.clone())
        .map_err(|e| ClientError::Malformed { service: SERVICE, message: e.to_string() })?;

    Ok(parsed
        .predictions
        .into_iter()
        .map(|p| PredictionCandidate {
            label: p.class.unwrap_or_else(|| NO_PREDICTION_LABEL.to_string()),
            confidence: p.confidence.unwrap_or(0.0),
        })
        .collect())
}

#[async_trait]
impl DiseaseClassifier for RoboflowClassifier {
    async fn classify(&self, image: Vec<u8>) -> Result<Classification, ClientError> {
        let form = Form::new().part("file", Part::bytes(image).file_name("upload.jpg"));

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .multipart(form)
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
        tracing::debug!("{} response: {}", SERVICE, raw);

        let candidates = parse_predictions(&raw)?;
        Ok(Classification { candidates, raw })
    }
}
