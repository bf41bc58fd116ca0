//! Crop Disease Diagnosis
//!
//! Turns free-form classifier labels into curated crop-disease guidance.
//!
//! - `knowledge_base/`: disease records and crop keywords (embedded or JSON)
//! - `validator`: trust gate on (label, confidence) pairs
//! - `resolver/`: ordered matching pipeline from label to record
//! - `diagnosis`: picks the candidate to present from the classifier's top 3
//!
//! The HTTP service (`api_server`, clients, config, auth) is built with the
//! `api` feature.

pub mod utils;
pub mod knowledge_base;
pub mod validator;
pub mod resolver;
pub mod diagnosis;
pub mod weather;
pub mod analysis;

#[cfg(feature = "api")]
pub mod config;
#[cfg(feature = "api")]
pub mod clients;
#[cfg(feature = "api")]
pub mod auth;
#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use utils::normalize_label;
pub use knowledge_base::{CropKeywordEntry, DiseaseRecord, KnowledgeBase, KnowledgeBaseError};
pub use validator::{validate, PredictionValidator, TrustLevel, TrustPolicy, ValidationVerdict};
pub use resolver::{resolve, DiseaseResolver, MatchKind, MatchPolicy, Resolution};
pub use diagnosis::{diagnose, Diagnosis, DiagnosisEngine, PredictionCandidate};
pub use weather::{planting_recommendation, PlantingRecommendation, WeatherReport};
pub use analysis::AnalysisReport;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use config::ServiceConfig;
