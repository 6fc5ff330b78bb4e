//! Deserialized attribute values.

use serde::{Deserialize, Serialize};

/// Value associated with a canonical attribute key.
///
/// `NoValue` means the attribute file exists but carries no usable
/// information (a strategy decision, e.g. placeholder text in firmware
/// tables). It is distinct from the attribute being absent, which surfaces
/// as [`AttrMapError::NotFound`](crate::AttrMapError::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Deserialized text content. May be empty.
    Text(String),
    /// The explicit no-value marker.
    NoValue,
}

impl AttrValue {
    /// Get the text content, or `None` for the no-value marker.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            AttrValue::NoValue => None,
        }
    }

    /// Check whether this is the no-value marker.
    pub fn is_no_value(&self) -> bool {
        matches!(self, AttrValue::NoValue)
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(AttrValue::from("Acme Corp").as_str(), Some("Acme Corp"));
        assert_eq!(AttrValue::NoValue.as_str(), None);
    }

    #[test]
    fn test_empty_text_is_not_no_value() {
        let value: AttrValue = AttrValue::from("");
        assert!(!value.is_no_value());
        assert_eq!(value.as_str(), Some(""));
    }
}
