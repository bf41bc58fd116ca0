//! Prediction Validator
//!
//! Decides whether a classifier prediction is trustworthy enough to show a
//! user. Pure function of (label, confidence) and the knowledge base.
//!
//! | Confidence | In knowledge base | Trust level              |
//! |------------|-------------------|--------------------------|
//! | < 0.30     | any               | invalid (low confidence) |
//! | >= 0.60    | yes               | valid (high confidence)  |
//! | 0.40-0.60  | yes               | valid (lower confidence) |
//! | otherwise  | -                 | invalid (unknown)        |

use crate::knowledge_base::KnowledgeBase;
use crate::utils::normalize_label;
use serde::{Deserialize, Serialize};

/// Confidence bands of the acceptance policy.
///
/// The defaults are fixed product policy; change them only with a product
/// requirement behind the change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustPolicy {
    /// Below this, every prediction is rejected
    pub min_confidence: f64,
    /// Known labels at or above this are accepted as lower-confidence
    pub accept_confidence: f64,
    /// Known labels at or above this are accepted as high-confidence
    pub high_confidence: f64,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.30,
            accept_confidence: 0.40,
            high_confidence: 0.60,
        }
    }
}

/// How far a prediction can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    InvalidLowConfidence,
    InvalidUnknown,
    ValidHighConfidence,
    ValidLowConfidence,
}

impl TrustLevel {
    pub fn is_valid(self) -> bool {
        matches!(self, TrustLevel::ValidHighConfidence | TrustLevel::ValidLowConfidence)
    }

    pub fn reason(self) -> &'static str {
        match self {
            TrustLevel::InvalidLowConfidence => "Confidence too low (< 30%)",
            TrustLevel::InvalidUnknown => "Not found in disease database",
            TrustLevel::ValidHighConfidence => "Valid - in database with high confidence",
            TrustLevel::ValidLowConfidence => "Valid - in database but lower confidence",
        }
    }
}

/// Outcome of validating one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub confidence: f64,
    pub reason: String,
    pub trust_level: TrustLevel,
}

impl ValidationVerdict {
    fn new(trust_level: TrustLevel, confidence: f64) -> Self {
        Self {
            is_valid: trust_level.is_valid(),
            confidence,
            reason: trust_level.reason().to_string(),
            trust_level,
        }
    }
}

/// Applies a [`TrustPolicy`] against a knowledge base
#[derive(Debug, Clone, Copy)]
pub struct PredictionValidator<'kb> {
    kb: &'kb KnowledgeBase,
    policy: TrustPolicy,
}

impl<'kb> PredictionValidator<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self::with_policy(kb, TrustPolicy::default())
    }

    pub fn with_policy(kb: &'kb KnowledgeBase, policy: TrustPolicy) -> Self {
        Self { kb, policy }
    }

    pub fn policy(&self) -> TrustPolicy {
        self.policy
    }

    /// Judge a single (label, confidence) prediction.
    ///
    /// A NaN confidence is treated as too low.
    pub fn validate(&self, label: &str, confidence: f64) -> ValidationVerdict {
        if confidence.is_nan() || confidence < self.policy.min_confidence {
            return ValidationVerdict::new(TrustLevel::InvalidLowConfidence, confidence);
        }

        let normalized = normalize_label(label);
        let known = self.kb.contains_label(&normalized);

        let level = if known && confidence >= self.policy.high_confidence {
            TrustLevel::ValidHighConfidence
        } else if known && confidence >= self.policy.accept_confidence {
            TrustLevel::ValidLowConfidence
        } else {
            TrustLevel::InvalidUnknown
        };

        ValidationVerdict::new(level, confidence)
    }
}

/// Validate against the embedded knowledge base with the default policy
pub fn validate(label: &str, confidence: f64) -> ValidationVerdict {
    PredictionValidator::new(KnowledgeBase::global()).validate(label, confidence)
}
