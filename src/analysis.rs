//! Analysis report: diagnosis + weather + planting advice for one upload

use crate::diagnosis::Diagnosis;
use crate::weather::{planting_recommendation, WeatherReport};
use serde::{Deserialize, Serialize};

/// Response body of the analyze endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub user: String,
    /// "lat,lon" exactly as submitted
    pub location: String,
    pub recommendation: String,
    pub weather: String,
    #[serde(rename = "temperature_celsius")]
    pub temperature_celsius: Option<f64>,
    pub disease_name: String,
    pub disease_confidence: f64,
    pub disease_description: String,
    pub prevention: Vec<String>,
    pub control: Vec<String>,
    pub details: String,
    pub crop_english_name: String,
    pub crop_scientific_name: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AnalysisReport {
    pub fn build(
        user: &str,
        lat: &str,
        lon: &str,
        weather: WeatherReport,
        diagnosis: Diagnosis,
    ) -> Self {
        let recommendation = planting_recommendation(weather.temperature_celsius);
        let record = diagnosis.record;

        Self {
            user: user.to_string(),
            location: format!("{},{}", lat, lon),
            recommendation: recommendation.message().to_string(),
            weather: weather.description,
            temperature_celsius: weather.temperature_celsius,
            disease_name: diagnosis.candidate_label,
            disease_confidence: diagnosis.confidence,
            disease_description: record.description,
            prevention: record.prevention_steps,
            control: record.control_steps,
            details: diagnosis.details,
            crop_english_name: record.crop_common_name,
            crop_scientific_name: record.crop_scientific_name,
            verified: diagnosis.verified,
            warning: diagnosis.advisory,
        }
    }
}
