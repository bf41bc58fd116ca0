//! Strategy 1: exact key match

use crate::knowledge_base::{DiseaseRecord, KnowledgeBase};

/// Record whose key equals the normalized label
pub fn match_exact_key<'kb>(label: &str, kb: &'kb KnowledgeBase) -> Option<&'kb DiseaseRecord> {
    kb.get(label)
}
