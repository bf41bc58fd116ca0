//! Disease Knowledge Base
//!
//! Immutable collection of curated disease records and crop keywords.
//! Built once (embedded tables or a JSON file) and shared read-only by every
//! request handler; there is no writer after construction.
//!
//! ## Contents
//! - `diseases`: embedded disease guide (23 records)
//! - `crops`: crop keyword table used for crop inference (35 keywords)

mod crops;
mod diseases;

use crate::utils::normalize_label;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Key of the record returned when nothing matches
pub const UNKNOWN_KEY: &str = "unknown";

/// A curated disease entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Normalized identifier (lowercase, underscore-joined), unique per knowledge base
    pub key: String,
    pub crop_common_name: String,
    pub crop_scientific_name: String,
    pub description: String,
    #[serde(default)]
    pub prevention_steps: Vec<String>,
    #[serde(default)]
    pub control_steps: Vec<String>,
    /// Normalized alternate labels that resolve to this record
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DiseaseRecord {
    /// True if `normalized` is one of this record's aliases
    pub fn has_alias(&self, normalized: &str) -> bool {
        self.aliases.iter().any(|a| a == normalized)
    }

    /// Fallback record for labels nothing in the knowledge base explains
    pub fn unknown() -> Self {
        Self {
            key: UNKNOWN_KEY.to_string(),
            crop_common_name: "Unknown Crop".to_string(),
            crop_scientific_name: "Unknown".to_string(),
            description: "No detailed information available. Please consult a local agricultural \
                          extension officer or provide a clearer image for better identification."
                .to_string(),
            prevention_steps: to_strings(&[
                "General good farming practices:",
                "- Crop rotation with non-host plants",
                "- Use resistant/certified varieties",
                "- Proper field sanitation",
            ]),
            control_steps: to_strings(&[
                "Recommended actions:",
                "- Consult local agricultural extension officer for identification and treatment",
                "- Monitor affected crops closely",
                "- Remove heavily infected plants if necessary",
            ]),
            aliases: Vec::new(),
        }
    }

    /// Generic record for a crop recognised from a keyword but with no
    /// matching disease in the guide
    pub fn generic_for_crop(crop: &CropKeywordEntry) -> Self {
        Self {
            key: format!("{}_unidentified_disease", crop.keyword),
            crop_common_name: crop.crop_name.clone(),
            crop_scientific_name: crop.crop_scientific_name.clone(),
            description: format!(
                "A disease affecting {}. Please consult a local agricultural officer for specific identification.",
                crop.crop_name
            ),
            prevention_steps: to_strings(&[
                "General good farming practices",
                "Crop rotation",
                "Use resistant varieties",
            ]),
            control_steps: to_strings(&[
                "Consult local agricultural extension officer for specific treatment",
            ]),
            aliases: Vec::new(),
        }
    }
}

/// Keyword used to infer the crop from a label the disease guide does not know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropKeywordEntry {
    pub keyword: String,
    pub crop_name: String,
    pub crop_scientific_name: String,
}

/// On-disk representation accepted by [`KnowledgeBase::from_json_file`]
#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    diseases: Vec<DiseaseRecord>,
    /// Omitted: the embedded crop keyword table is used
    crop_keywords: Option<Vec<CropKeywordEntry>>,
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate disease key '{0}'")]
    DuplicateKey(String),

    #[error("disease record with empty key")]
    EmptyKey,

    #[error("crop keyword entry with empty keyword")]
    EmptyKeyword,
}

/// Immutable disease and crop-keyword store.
///
/// Iteration order of [`diseases`](Self::diseases) and
/// [`crop_keywords`](Self::crop_keywords) is insertion order and is part of
/// the resolver's tie-break behaviour.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseRecord>,
    crop_keywords: Vec<CropKeywordEntry>,
    key_index: FxHashMap<String, usize>,
}

impl KnowledgeBase {
    /// Build a knowledge base, normalizing keys, aliases and keywords.
    ///
    /// Fails on empty or duplicate keys (after normalization).
    pub fn new(
        diseases: Vec<DiseaseRecord>,
        crop_keywords: Vec<CropKeywordEntry>,
    ) -> Result<Self, KnowledgeBaseError> {
        let mut normalized = Vec::with_capacity(diseases.len());
        for mut record in diseases {
            record.key = normalize_label(&record.key);
            if record.key.is_empty() {
                return Err(KnowledgeBaseError::EmptyKey);
            }
            record.aliases = record
                .aliases
                .iter()
                .map(|a| normalize_label(a))
                .filter(|a| !a.is_empty())
                .collect();
            normalized.push(record);
        }

        let mut keywords = Vec::with_capacity(crop_keywords.len());
        for mut entry in crop_keywords {
            entry.keyword = normalize_label(&entry.keyword);
            if entry.keyword.is_empty() {
                return Err(KnowledgeBaseError::EmptyKeyword);
            }
            keywords.push(entry);
        }

        let mut key_index = FxHashMap::default();
        for (idx, record) in normalized.iter().enumerate() {
            if key_index.insert(record.key.clone(), idx).is_some() {
                return Err(KnowledgeBaseError::DuplicateKey(record.key.clone()));
            }
        }

        Ok(Self {
            diseases: normalized,
            crop_keywords: keywords,
            key_index,
        })
    }

    /// Knowledge base compiled from the embedded tables
    pub fn builtin() -> Self {
        let diseases: Vec<DiseaseRecord> = diseases::DISEASE_ROWS
            .iter()
            .map(|row| DiseaseRecord {
                key: row.key.to_string(),
                crop_common_name: row.crop_name.to_string(),
                crop_scientific_name: row.crop_scientific_name.to_string(),
                description: row.description.to_string(),
                prevention_steps: to_strings(row.prevention),
                control_steps: to_strings(row.control),
                aliases: to_strings(row.aliases),
            })
            .collect();

        // Embedded rows are already normalized and unique (checked in tests),
        // so the index is built directly.
        let key_index = diseases
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.key.clone(), idx))
            .collect();

        Self {
            diseases,
            crop_keywords: builtin_crop_keywords(),
            key_index,
        }
    }

    /// Process-wide embedded knowledge base, built on first use
    pub fn global() -> &'static KnowledgeBase {
        static GLOBAL: OnceLock<KnowledgeBase> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let kb = KnowledgeBase::builtin();
            tracing::info!(
                "Loaded embedded knowledge base ({} diseases, {} crop keywords)",
                kb.diseases.len(),
                kb.crop_keywords.len()
            );
            kb
        })
    }

    /// Parse a knowledge base from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        let file: KnowledgeBaseFile = serde_json::from_str(json)?;
        let crop_keywords = file.crop_keywords.unwrap_or_else(builtin_crop_keywords);
        Self::new(file.diseases, crop_keywords)
    }

    /// Load a knowledge base from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let contents = std::fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded knowledge base from {:?} ({} diseases, {} crop keywords)",
            path,
            kb.diseases.len(),
            kb.crop_keywords.len()
        );
        Ok(kb)
    }

    /// Record by exact (already normalized) key
    pub fn get(&self, key: &str) -> Option<&DiseaseRecord> {
        self.key_index.get(key).map(|&idx| &self.diseases[idx])
    }

    /// All disease records in iteration order
    pub fn diseases(&self) -> &[DiseaseRecord] {
        &self.diseases
    }

    /// All crop keywords in scan order
    pub fn crop_keywords(&self) -> &[CropKeywordEntry] {
        &self.crop_keywords
    }

    /// True if the normalized label is some record's key or alias
    pub fn contains_label(&self, normalized: &str) -> bool {
        self.key_index.contains_key(normalized)
            || self.diseases.iter().any(|r| r.has_alias(normalized))
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_crop_keywords() -> Vec<CropKeywordEntry> {
    crops::CROP_ROWS
        .iter()
        .map(|row| CropKeywordEntry {
            keyword: row.keyword.to_string(),
            crop_name: row.name.to_string(),
            crop_scientific_name: row.scientific_name.to_string(),
        })
        .collect()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
