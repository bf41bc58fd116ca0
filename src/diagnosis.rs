//! Detection Orchestration
//!
//! Picks which classifier candidate to present: the first of the top three
//! that the validator accepts, else the top candidate flagged as unverified.

use crate::knowledge_base::{DiseaseRecord, KnowledgeBase};
use crate::resolver::{DiseaseResolver, MatchKind, MatchPolicy};
use crate::validator::{PredictionValidator, TrustLevel, TrustPolicy};
use serde::{Deserialize, Serialize};

/// Number of top candidates offered to the validator
pub const MAX_CANDIDATES: usize = 3;

/// Label reported when the classifier returned nothing
pub const NO_PREDICTION_LABEL: &str = "Unknown Disease";

/// Advisory attached to diagnoses no candidate could verify
pub const UNVERIFIED_ADVISORY: &str =
    "Prediction may not be accurate. Please consult a local agricultural officer.";

/// One (label, confidence) guess from the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCandidate {
    pub label: String,
    pub confidence: f64,
}

impl PredictionCandidate {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Final answer for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub candidate_label: String,
    pub confidence: f64,
    pub record: DiseaseRecord,
    pub verified: bool,
    /// `None` when there were no candidates at all
    pub matched_by: Option<MatchKind>,
    /// `None` when there were no candidates or the winner was unverified
    pub trust_level: Option<TrustLevel>,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl Diagnosis {
    fn no_predictions() -> Self {
        Self {
            candidate_label: NO_PREDICTION_LABEL.to_string(),
            confidence: 0.0,
            record: no_prediction_record(),
            verified: true,
            matched_by: None,
            trust_level: None,
            details: "No predictions from model.".to_string(),
            advisory: None,
        }
    }
}

/// Record shown when the classifier produced no candidates
pub fn no_prediction_record() -> DiseaseRecord {
    DiseaseRecord {
        key: "no_prediction".to_string(),
        crop_common_name: "Unable to Identify".to_string(),
        crop_scientific_name: "Unknown".to_string(),
        description: "Could not identify any crop/disease. Please provide a clearer image showing \
                      the affected plant part or consult a local agricultural extension officer."
            .to_string(),
        prevention_steps: vec!["General good farming practices".to_string()],
        control_steps: vec![
            "Consult local agricultural extension officer for identification and treatment"
                .to_string(),
        ],
        aliases: Vec::new(),
    }
}

/// Validator + resolver bound to one knowledge base
#[derive(Debug, Clone)]
pub struct DiagnosisEngine<'kb> {
    validator: PredictionValidator<'kb>,
    resolver: DiseaseResolver<'kb>,
}

impl<'kb> DiagnosisEngine<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self::with_policies(kb, TrustPolicy::default(), MatchPolicy::default())
    }

    pub fn with_policies(kb: &'kb KnowledgeBase, trust: TrustPolicy, matching: MatchPolicy) -> Self {
        Self {
            validator: PredictionValidator::with_policy(kb, trust),
            resolver: DiseaseResolver::with_policy(kb, matching),
        }
    }

    pub fn validator(&self) -> &PredictionValidator<'kb> {
        &self.validator
    }

    pub fn resolver(&self) -> &DiseaseResolver<'kb> {
        &self.resolver
    }

    /// Diagnose from classifier candidates, best first
    pub fn diagnose(&self, candidates: &[PredictionCandidate]) -> Diagnosis {
        let Some(top) = candidates.first() else {
            tracing::warn!("No predictions returned from classifier");
            return Diagnosis::no_predictions();
        };

        for (idx, candidate) in candidates.iter().take(MAX_CANDIDATES).enumerate() {
            tracing::info!(
                "Prediction {}: '{}' with confidence: {:.2}%",
                idx + 1,
                candidate.label,
                candidate.confidence * 100.0
            );

            let verdict = self.validator.validate(&candidate.label, candidate.confidence);
            tracing::info!("Validation result: {}", verdict.reason);

            if verdict.is_valid {
                let resolution = self.resolver.resolve_label(&candidate.label);
                tracing::info!(
                    "Using prediction: {} -> Crop: {}",
                    candidate.label,
                    resolution.record.crop_common_name
                );
                return Diagnosis {
                    candidate_label: candidate.label.clone(),
                    confidence: candidate.confidence,
                    details: describe(candidate),
                    matched_by: Some(resolution.matched_by),
                    trust_level: Some(verdict.trust_level),
                    record: resolution.record.into_owned(),
                    verified: true,
                    advisory: None,
                };
            }
        }

        tracing::warn!("No valid predictions found. Using unvalidated: {}", top.label);
        let resolution = self.resolver.resolve_label(&top.label);
        Diagnosis {
            candidate_label: top.label.clone(),
            confidence: top.confidence,
            details: describe(top),
            matched_by: Some(resolution.matched_by),
            trust_level: None,
            record: resolution.record.into_owned(),
            verified: false,
            advisory: Some(UNVERIFIED_ADVISORY.to_string()),
        }
    }
}

/// Diagnose against the embedded knowledge base with default policies
pub fn diagnose(candidates: &[PredictionCandidate]) -> Diagnosis {
    DiagnosisEngine::new(KnowledgeBase::global()).diagnose(candidates)
}

fn describe(candidate: &PredictionCandidate) -> String {
    format!("class: {}, confidence: {:.4}", candidate.label, candidate.confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidates() {
        let d = diagnose(&[]);
        assert!(d.verified);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.candidate_label, NO_PREDICTION_LABEL);
        assert_eq!(d.record.crop_common_name, "Unable to Identify");
        assert!(d.matched_by.is_none());
    }

    #[test]
    fn test_first_valid_candidate_wins() {
        let candidates = vec![
            PredictionCandidate::new("mystery_spots", 0.9),
            PredictionCandidate::new("Rice Blast", 0.7),
            PredictionCandidate::new("wheat_rust", 0.95),
        ];
        let d = diagnose(&candidates);
        assert!(d.verified);
        assert_eq!(d.candidate_label, "Rice Blast");
        assert_eq!(d.record.key, "rice_leaf_blast");
        assert_eq!(d.trust_level, Some(TrustLevel::ValidHighConfidence));
        assert!(d.advisory.is_none());
    }

    #[test]
    fn test_only_top_three_considered() {
        let candidates = vec![
            PredictionCandidate::new("xyz", 0.9),
            PredictionCandidate::new("abc", 0.8),
            PredictionCandidate::new("def", 0.7),
            PredictionCandidate::new("wheat_rust", 0.95),
        ];
        let d = diagnose(&candidates);
        assert!(!d.verified);
        assert_eq!(d.candidate_label, "xyz");
    }

    #[test]
    fn test_unverified_top_candidate_still_resolved() {
        let candidates = vec![
            PredictionCandidate::new("tomato_something_unknown", 0.85),
            PredictionCandidate::new("corn_leaf_blight", 0.2),
        ];
        let d = diagnose(&candidates);
        assert!(!d.verified);
        assert_eq!(d.candidate_label, "tomato_something_unknown");
        assert_eq!(d.confidence, 0.85);
        assert_eq!(d.record.crop_common_name, "Tomato");
        assert_eq!(d.matched_by, Some(MatchKind::CropKeyword));
        assert_eq!(d.advisory.as_deref(), Some(UNVERIFIED_ADVISORY));
    }

    #[test]
    fn test_lower_confidence_member_is_verified() {
        let d = diagnose(&[PredictionCandidate::new("sigatoka", 0.5)]);
        assert!(d.verified);
        assert_eq!(d.record.key, "banana_sigatoka");
        assert_eq!(d.trust_level, Some(TrustLevel::ValidLowConfidence));
    }
}
