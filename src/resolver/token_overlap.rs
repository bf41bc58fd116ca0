//! Strategy 5: token overlap
//!
//! Labels and keys are compared as sets of underscore-delimited tokens:
//!
//! ```text
//! ratio = |tokens(label) ∩ tokens(key)| / max(|tokens(label)|, |tokens(key)|)
//! ```
//!
//! The first record (knowledge-base order) whose ratio is strictly above the
//! threshold wins; there is no best-score search.

use super::ScoredMatch;
use crate::knowledge_base::KnowledgeBase;
use crate::utils::token_set;

pub fn match_token_overlap<'kb>(
    label: &str,
    kb: &'kb KnowledgeBase,
    threshold: f64,
) -> Option<ScoredMatch<'kb>> {
    let label_tokens = token_set(label);

    kb.diseases().iter().find_map(|record| {
        let key_tokens = token_set(&record.key);
        let shared = label_tokens.intersection(&key_tokens).count();
        if shared == 0 {
            return None;
        }
        let score = shared as f64 / label_tokens.len().max(key_tokens.len()) as f64;
        (score > threshold).then_some(ScoredMatch { record, score })
    })
}
