//! Strategy 4: character-set similarity
//!
//! Only records whose key contains the label, or is contained in it, are
//! scored:
//!
//! ```text
//! score = |chars(label) ∩ chars(key)| / max(|chars(label)|, |chars(key)|)
//! ```
//!
//! The best-scoring record (earliest on ties) is accepted when its score is
//! strictly above the threshold.

use super::ScoredMatch;
use crate::knowledge_base::KnowledgeBase;
use crate::utils::char_set;

/// Character-set overlap ratio of two strings, in [0, 1]
pub fn char_similarity(a: &str, b: &str) -> f64 {
    let a_chars = char_set(a);
    let b_chars = char_set(b);
    let larger = a_chars.len().max(b_chars.len());
    if larger == 0 {
        return 0.0;
    }
    a_chars.intersection(&b_chars).count() as f64 / larger as f64
}

pub fn match_similarity<'kb>(
    label: &str,
    kb: &'kb KnowledgeBase,
    threshold: f64,
) -> Option<ScoredMatch<'kb>> {
    let mut best: Option<ScoredMatch<'kb>> = None;

    for record in kb.diseases() {
        if !(record.key.contains(label) || label.contains(record.key.as_str())) {
            continue;
        }
        let score = char_similarity(label, &record.key);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredMatch { record, score });
        }
    }

    best.filter(|b| b.score > threshold)
}
