//! Pluggable key normalization and value deserialization.

use crate::error::AttrMapError;
use crate::key::{normalize_path_key, RawKey};
use crate::value::AttrValue;

/// Strategy supplying the two extension points of an attribute mapping.
///
/// Both methods are pure: no filesystem access, no side effects. The
/// mapping calls `normalize` on every raw key before touching its caches
/// and `deserialize` on every successful file read.
pub trait AttrStrategy {
    /// Convert a raw key into its canonical form.
    ///
    /// Canonical keys are used both for cache lookups and as the relative
    /// filesystem path of the attribute. The result must be idempotent
    /// (normalizing a canonical key returns it unchanged) and must never
    /// be empty - the mapping treats an empty result as a contract
    /// violation and panics.
    ///
    /// # Arguments
    /// * `key` - Raw key as supplied by the caller
    ///
    /// # Errors
    /// Returns [`AttrMapError::InvalidKey`] for keys this strategy cannot
    /// resolve (e.g. structured pairs with an unknown section).
    fn normalize(&self, key: &RawKey) -> Result<String, AttrMapError>;

    /// Convert text read from an attribute file into a value.
    ///
    /// # Arguments
    /// * `normkey` - Canonical key the text was read for
    /// * `text` - Full text content of the attribute file
    fn deserialize(&self, normkey: &str, text: &str) -> AttrValue;
}

/// Default strategy: lexical path normalization, trailing-whitespace trim.
///
/// Structured pair keys are rejected; only path-form keys are understood.
/// A whitespace-only file deserializes to empty text, not to the no-value
/// marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl AttrStrategy for DefaultStrategy {
    fn normalize(&self, key: &RawKey) -> Result<String, AttrMapError> {
        match key {
            RawKey::Path(path) => Ok(normalize_path_key(path)),
            RawKey::Pair(..) => Err(AttrMapError::InvalidKey {
                key: key.to_string(),
            }),
        }
    }

    fn deserialize(&self, _normkey: &str, text: &str) -> AttrValue {
        AttrValue::Text(text.trim_end().to_string())
    }
}
