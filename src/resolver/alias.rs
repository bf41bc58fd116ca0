//! Strategy 2: alias match
//!
//! An alias listed under several records ("potato_blight", "fungal_spot")
//! resolves to the first record in knowledge-base order.

use crate::knowledge_base::{DiseaseRecord, KnowledgeBase};

/// First record listing the normalized label as an alias
pub fn match_alias<'kb>(label: &str, kb: &'kb KnowledgeBase) -> Option<&'kb DiseaseRecord> {
    kb.diseases().iter().find(|record| record.has_alias(label))
}
