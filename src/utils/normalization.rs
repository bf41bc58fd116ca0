//! Label Normalization Utilities
//!
//! Classifier labels arrive with inconsistent casing and separators
//! ("Corn Blight", "corn-blight", "CORN_BLIGHT"). Every comparison against the
//! knowledge base happens on the normalized form:
//! - surrounding whitespace trimmed
//! - lowercased
//! - spaces and hyphens replaced by underscores

use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Token separator in normalized labels and knowledge-base keys
pub const TOKEN_SEPARATOR: char = '_';

/// Normalize a raw label for knowledge-base comparison.
///
/// Idempotent: `normalize_label(&normalize_label(x)) == normalize_label(x)`.
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { TOKEN_SEPARATOR } else { c })
        .collect()
}

/// Split a normalized label into its underscore-delimited tokens.
///
/// Empty tokens (from doubled or trailing separators) are kept, mirroring a
/// plain split; two labels that both end in `_` share the empty token.
pub fn label_tokens(normalized: &str) -> SmallVec<[&str; 4]> {
    normalized.split(TOKEN_SEPARATOR).collect()
}

/// Distinct token set of a normalized label
pub fn token_set(normalized: &str) -> BTreeSet<&str> {
    label_tokens(normalized).into_iter().collect()
}

/// Distinct characters of a string
pub fn char_set(s: &str) -> BTreeSet<char> {
    s.chars().collect()
}
