//! Utility modules shared by the validator and resolver
//!
//! - Normalization: label canonicalization, tokenization, character sets

pub mod normalization;

// Re-export commonly used functions
pub use normalization::{char_set, label_tokens, normalize_label, token_set};
