//! Strategy 3: crop-keyword inference
//!
//! Recovers the crop when the disease itself is unknown. The first crop
//! keyword (table order) found inside the label decides the outcome:
//! 1. first record whose key, or lowercased crop name, contains the keyword
//! 2. otherwise a generic record naming the inferred crop

use crate::knowledge_base::{CropKeywordEntry, DiseaseRecord, KnowledgeBase};

/// Outcome of crop-keyword inference
#[derive(Debug, Clone, PartialEq)]
pub enum CropKeywordMatch<'kb> {
    /// A curated record for the inferred crop
    Record {
        keyword: &'kb CropKeywordEntry,
        record: &'kb DiseaseRecord,
    },
    /// No curated record mentions the crop
    Generic {
        keyword: &'kb CropKeywordEntry,
        record: DiseaseRecord,
    },
}

impl<'kb> CropKeywordMatch<'kb> {
    pub fn keyword(&self) -> &'kb CropKeywordEntry {
        match self {
            CropKeywordMatch::Record { keyword, .. } | CropKeywordMatch::Generic { keyword, .. } => {
                keyword
            }
        }
    }
}

pub fn match_crop_keyword<'kb>(label: &str, kb: &'kb KnowledgeBase) -> Option<CropKeywordMatch<'kb>> {
    let keyword = kb
        .crop_keywords()
        .iter()
        .find(|entry| label.contains(entry.keyword.as_str()))?;

    let kw = keyword.keyword.as_str();
    let record = kb.diseases().iter().find(|record| {
        record.key.contains(kw) || record.crop_common_name.to_lowercase().contains(kw)
    });

    Some(match record {
        Some(record) => CropKeywordMatch::Record { keyword, record },
        None => CropKeywordMatch::Generic {
            keyword,
            record: DiseaseRecord::generic_for_crop(keyword),
        },
    })
}
