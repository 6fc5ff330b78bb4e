//! Key and value handling for the DMI id attribute tree.

use once_cell::sync::Lazy;
use regex::Regex;

use sysattr_attrmap::{
    normalize_path_key, AttrMapError, AttrStrategy, AttrValue, RawKey, SectionHandle,
};

use crate::section::Section;

/// Placeholder text that firmware vendors leave in unpopulated DMI
/// fields, matched case-insensitively at the start of the cleaned value.
static NO_INFO_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:not available|to be filled|dmi table is broken)").expect("valid regex")
});

/// Deserialize text read from a DMI id attribute file.
///
/// Strips every line, drops blank lines and rejoins with newlines; a
/// result that starts with one of the known "no information available"
/// phrases becomes [`AttrValue::NoValue`].
///
/// # Arguments
/// * `text` - Full text content of the attribute file
pub fn dmi_value(text: &str) -> AttrValue {
    let cleaned: String = text
        .lines()
        .map(str::trim)
        .filter(|line: &&str| !line.is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    if NO_INFO_PHRASES.is_match(&cleaned) {
        AttrValue::NoValue
    } else {
        AttrValue::Text(cleaned)
    }
}

/// Resolve a dmidecode `(section, field)` pair to its sysfs attribute.
fn resolve_pair(handle: &SectionHandle, field: &str) -> Option<String> {
    Section::resolve(handle)?.alias(field).map(str::to_string)
}

/// Strategy for `/sys/class/dmi/id` with plain path keys.
///
/// Keys normalize like any attribute path; only the deserialization is
/// DMI-aware.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmiIdStrategy;

impl AttrStrategy for DmiIdStrategy {
    fn normalize(&self, key: &RawKey) -> Result<String, AttrMapError> {
        match key {
            RawKey::Path(path) => Ok(normalize_path_key(path)),
            RawKey::Pair(..) => Err(AttrMapError::InvalidKey {
                key: key.to_string(),
            }),
        }
    }

    fn deserialize(&self, _normkey: &str, text: &str) -> AttrValue {
        dmi_value(text)
    }
}

/// Strategy for `/sys/class/dmi/id` that additionally understands
/// dmidecode-style keys.
///
/// Structured `(section, field)` pairs resolve through the alias tables
/// and fail with an invalid-key error when unresolvable. Path keys
/// normalize as usual, then a `section/field` shaped result is given one
/// chance to resolve through the same tables; if that fails the
/// normalized path stands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmiStrategy;

impl AttrStrategy for DmiStrategy {
    fn normalize(&self, key: &RawKey) -> Result<String, AttrMapError> {
        match key {
            RawKey::Pair(handle, field) => {
                resolve_pair(handle, field).ok_or_else(|| AttrMapError::InvalidKey {
                    key: key.to_string(),
                })
            }
            RawKey::Path(path) => {
                let normkey: String = normalize_path_key(path);
                if let Some((section, field)) = normkey.rsplit_once('/') {
                    let handle: SectionHandle = SectionHandle::Named(section.to_string());
                    if let Some(aliased) = resolve_pair(&handle, field) {
                        return Ok(aliased);
                    }
                }
                Ok(normkey)
            }
        }
    }

    fn deserialize(&self, _normkey: &str, text: &str) -> AttrValue {
        dmi_value(text)
    }
}
