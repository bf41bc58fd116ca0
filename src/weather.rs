//! Weather report and planting recommendation
//!
//! The weather lookup itself lives in `clients::agromonitoring`; this module holds
//! the provider-independent report type and the planting policy.

use serde::{Deserialize, Serialize};

/// Planting is recommended strictly above this air temperature (°C)
pub const PLANTING_MIN_TEMP_C: f64 = 17.0;

const KELVIN_OFFSET: f64 = 273.15;

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub description: String,
    /// `None` when the provider did not report a temperature
    pub temperature_celsius: Option<f64>,
}

impl WeatherReport {
    /// Build from a Kelvin reading, rounding Celsius to 2 decimals
    pub fn from_kelvin(description: impl Into<String>, kelvin: Option<f64>) -> Self {
        Self {
            description: description.into(),
            temperature_celsius: kelvin.map(kelvin_to_celsius),
        }
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - KELVIN_OFFSET) * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantingRecommendation {
    Suitable,
    NotSuitable,
}

impl PlantingRecommendation {
    pub fn message(self) -> &'static str {
        match self {
            PlantingRecommendation::Suitable => "Suitable for planting",
            PlantingRecommendation::NotSuitable => "Not suitable for planting",
        }
    }
}

/// Unknown temperatures are never suitable
pub fn planting_recommendation(temperature_celsius: Option<f64>) -> PlantingRecommendation {
    match temperature_celsius {
        Some(t) if t > PLANTING_MIN_TEMP_C => PlantingRecommendation::Suitable,
        _ => PlantingRecommendation::NotSuitable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kelvin_conversion_rounds() {
        assert_relative_eq!(kelvin_to_celsius(273.15), 0.0);
        assert_relative_eq!(kelvin_to_celsius(298.157), 25.01);
        assert_relative_eq!(kelvin_to_celsius(250.0), -23.15);
    }

    #[test]
    fn test_from_kelvin() {
        let r = WeatherReport::from_kelvin("light rain", Some(295.15));
        assert_eq!(r.description, "light rain");
        assert_relative_eq!(r.temperature_celsius.unwrap(), 22.0);

        let r = WeatherReport::from_kelvin("Unknown", None);
        assert!(r.temperature_celsius.is_none());
    }

    #[test]
    fn test_planting_threshold_is_strict() {
        assert_eq!(planting_recommendation(Some(17.01)), PlantingRecommendation::Suitable);
        assert_eq!(planting_recommendation(Some(17.0)), PlantingRecommendation::NotSuitable);
        assert_eq!(planting_recommendation(Some(-3.0)), PlantingRecommendation::NotSuitable);
        assert_eq!(planting_recommendation(None), PlantingRecommendation::NotSuitable);
    }

    #[test]
    fn test_recommendation_messages() {
        assert_eq!(PlantingRecommendation::Suitable.message(), "Suitable for planting");
        assert_eq!(PlantingRecommendation::NotSuitable.message(), "Not suitable for planting");
    }
}
