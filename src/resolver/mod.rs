//! Disease Resolver
//!
//! Maps a noisy classifier label to a knowledge-base record. Total: every
//! label resolves to something, with the default record as the floor.
//!
//! ## Pipeline (first success wins)
//! 1. Exact key match
//! 2. Alias match
//! 3. Crop-keyword inference
//! 4. Character-set similarity (> 0.5)
//! 5. Token overlap (> 0.4)
//! 6. Default record
//!
//! Each strategy lives in its own module; [`MatchStrategy`] tags them so the
//! pipeline is a plain ordered list.

pub mod alias;
pub mod crop_keyword;
pub mod exact_key;
pub mod similarity;
pub mod token_overlap;

pub use alias::match_alias;
pub use crop_keyword::{match_crop_keyword, CropKeywordMatch};
pub use exact_key::match_exact_key;
pub use similarity::{char_similarity, match_similarity};
pub use token_overlap::match_token_overlap;

use crate::knowledge_base::{DiseaseRecord, KnowledgeBase};
use crate::utils::normalize_label;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A record picked by a scoring strategy, with its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch<'kb> {
    pub record: &'kb DiseaseRecord,
    pub score: f64,
}

/// Fuzzy-matching thresholds.
///
/// Defaults are fixed policy constants; retune only against labelled
/// classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Minimum (exclusive) character-set similarity
    pub similarity_threshold: f64,
    /// Minimum (exclusive) token overlap ratio
    pub token_overlap_threshold: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.5,
            token_overlap_threshold: 0.4,
        }
    }
}

impl MatchPolicy {
    /// Strategies in evaluation order
    pub fn pipeline(&self) -> Vec<MatchStrategy> {
        vec![
            MatchStrategy::ExactKey,
            MatchStrategy::Alias,
            MatchStrategy::CropKeyword,
            MatchStrategy::Similarity { threshold: self.similarity_threshold },
            MatchStrategy::TokenOverlap { threshold: self.token_overlap_threshold },
        ]
    }
}

/// Which path produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactKey,
    Alias,
    CropKeyword,
    /// Crop inferred from a keyword, no curated record for it
    CropKeywordGeneric,
    Similarity,
    TokenOverlap,
    /// Nothing matched (or the label was empty)
    Fallback,
}

/// One step of the resolution pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchStrategy {
    ExactKey,
    Alias,
    CropKeyword,
    Similarity { threshold: f64 },
    TokenOverlap { threshold: f64 },
}

impl MatchStrategy {
    /// Try this strategy on an already normalized, non-empty label
    pub fn apply<'kb>(&self, label: &str, kb: &'kb KnowledgeBase) -> Option<Resolution<'kb>> {
        match *self {
            MatchStrategy::ExactKey => {
                match_exact_key(label, kb).map(|r| Resolution::borrowed(r, MatchKind::ExactKey, None))
            }
            MatchStrategy::Alias => {
                match_alias(label, kb).map(|r| Resolution::borrowed(r, MatchKind::Alias, None))
            }
            MatchStrategy::CropKeyword => match_crop_keyword(label, kb).map(|m| match m {
                CropKeywordMatch::Record { record, .. } => {
                    Resolution::borrowed(record, MatchKind::CropKeyword, None)
                }
                CropKeywordMatch::Generic { record, .. } => Resolution {
                    record: Cow::Owned(record),
                    matched_by: MatchKind::CropKeywordGeneric,
                    score: None,
                },
            }),
            MatchStrategy::Similarity { threshold } => match_similarity(label, kb, threshold)
                .map(|m| Resolution::borrowed(m.record, MatchKind::Similarity, Some(m.score))),
            MatchStrategy::TokenOverlap { threshold } => match_token_overlap(label, kb, threshold)
                .map(|m| Resolution::borrowed(m.record, MatchKind::TokenOverlap, Some(m.score))),
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self {
            MatchStrategy::ExactKey => MatchKind::ExactKey,
            MatchStrategy::Alias => MatchKind::Alias,
            MatchStrategy::CropKeyword => MatchKind::CropKeyword,
            MatchStrategy::Similarity { .. } => MatchKind::Similarity,
            MatchStrategy::TokenOverlap { .. } => MatchKind::TokenOverlap,
        }
    }
}

/// Result of resolving a label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<'kb> {
    pub record: Cow<'kb, DiseaseRecord>,
    pub matched_by: MatchKind,
    /// Similarity or overlap score for fuzzy matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl<'kb> Resolution<'kb> {
    fn borrowed(record: &'kb DiseaseRecord, matched_by: MatchKind, score: Option<f64>) -> Self {
        Self {
            record: Cow::Borrowed(record),
            matched_by,
            score,
        }
    }

    fn fallback() -> Self {
        Self {
            record: Cow::Owned(DiseaseRecord::unknown()),
            matched_by: MatchKind::Fallback,
            score: None,
        }
    }

    pub fn record(&self) -> &DiseaseRecord {
        &self.record
    }

    pub fn is_fallback(&self) -> bool {
        self.matched_by == MatchKind::Fallback
    }

    /// Detach from the knowledge base borrow
    pub fn into_owned(self) -> Resolution<'static> {
        Resolution {
            record: Cow::Owned(self.record.into_owned()),
            matched_by: self.matched_by,
            score: self.score,
        }
    }
}

/// Runs the match pipeline against one knowledge base
#[derive(Debug, Clone)]
pub struct DiseaseResolver<'kb> {
    kb: &'kb KnowledgeBase,
    strategies: Vec<MatchStrategy>,
}

impl<'kb> DiseaseResolver<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self::with_policy(kb, MatchPolicy::default())
    }

    pub fn with_policy(kb: &'kb KnowledgeBase, policy: MatchPolicy) -> Self {
        Self {
            kb,
            strategies: policy.pipeline(),
        }
    }

    pub fn knowledge_base(&self) -> &'kb KnowledgeBase {
        self.kb
    }

    /// Resolve a possibly absent label; never fails
    pub fn resolve(&self, label: Option<&str>) -> Resolution<'kb> {
        let raw = match label {
            Some(raw) => raw,
            None => return Resolution::fallback(),
        };

        let normalized = normalize_label(raw);
        if normalized.is_empty() {
            return Resolution::fallback();
        }

        tracing::debug!("Looking up disease: '{}' (normalized: '{}')", raw, normalized);

        for strategy in &self.strategies {
            match strategy.apply(&normalized, self.kb) {
                Some(resolution) => {
                    tracing::info!(
                        "Resolved '{}' via {:?} -> {} (crop: {}, score: {:?})",
                        normalized,
                        resolution.matched_by,
                        resolution.record.key,
                        resolution.record.crop_common_name,
                        resolution.score
                    );
                    return resolution;
                }
                None => tracing::debug!("{:?} found no match for '{}'", strategy.kind(), normalized),
            }
        }

        tracing::warn!("No match found for disease: '{}'. Returning default info.", raw);
        Resolution::fallback()
    }

    pub fn resolve_label(&self, label: &str) -> Resolution<'kb> {
        self.resolve(Some(label))
    }
}

/// Resolve against the embedded knowledge base with the default policy
pub fn resolve(label: Option<&str>) -> Resolution<'static> {
    DiseaseResolver::new(KnowledgeBase::global()).resolve(label)
}
