//! Attribute key forms and default normalization.

use std::fmt;
use std::path::{Component, Path};

/// Reference to a section in a structured attribute key.
///
/// Structured keys are only meaningful to strategies that carry a section
/// table; the default strategy rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionHandle {
    /// Small integer handle (e.g. `0x1`).
    Numeric(u32),
    /// Section name, matched case-insensitively by resolving strategies.
    Named(String),
}

impl fmt::Display for SectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionHandle::Numeric(handle) => write!(f, "{:#x}", handle),
            SectionHandle::Named(name) => write!(f, "{}", name),
        }
    }
}

/// An attribute key as supplied by a caller.
///
/// Raw keys come in two forms: a relative path (possibly with redundant
/// separators or `.`/`..` segments) and a two-element structured form for
/// strategies that resolve `(section, field)` pairs. Canonical keys are
/// always plain strings produced by a strategy's `normalize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKey {
    /// Path-form key, relative to the mapping root.
    Path(String),
    /// Structured `(section, field)` key.
    Pair(SectionHandle, String),
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawKey::Path(path) => write!(f, "{}", path),
            RawKey::Pair(section, field) => write!(f, "({}, {})", section, field),
        }
    }
}

impl From<&str> for RawKey {
    fn from(key: &str) -> Self {
        RawKey::Path(key.to_string())
    }
}

impl From<String> for RawKey {
    fn from(key: String) -> Self {
        RawKey::Path(key)
    }
}

impl From<(u32, &str)> for RawKey {
    fn from((handle, field): (u32, &str)) -> Self {
        RawKey::Pair(SectionHandle::Numeric(handle), field.to_string())
    }
}

impl From<(u32, String)> for RawKey {
    fn from((handle, field): (u32, String)) -> Self {
        RawKey::Pair(SectionHandle::Numeric(handle), field)
    }
}

impl From<(&str, &str)> for RawKey {
    fn from((section, field): (&str, &str)) -> Self {
        RawKey::Pair(SectionHandle::Named(section.to_string()), field.to_string())
    }
}

impl From<(String, String)> for RawKey {
    fn from((section, field): (String, String)) -> Self {
        RawKey::Pair(SectionHandle::Named(section), field)
    }
}

/// Default normalization for path-form keys.
///
/// Collapses separator runs and `.` segments, resolves `..` segments
/// lexically (without filesystem access), and strips the leading separator
/// so the result can be joined under a root directory. `..` segments
/// directly under the root are dropped, matching how the kernel resolves
/// them. A key that normalizes to nothing becomes `"."`.
///
/// Normalizing an already-canonical key returns it unchanged.
///
/// # Arguments
/// * `raw` - Path-form attribute key
///
/// # Returns
/// The canonical key, using `/` as the separator.
pub fn normalize_path_key(raw: &str) -> String {
    let mut parts: Vec<Component> = Vec::new();
    let mut rooted: bool = false;

    for component in Path::new(raw).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else if !rooted {
                    parts.push(component);
                }
            }
            Component::Normal(_) => parts.push(component),
        }
    }

    let normalized: String = parts
        .iter()
        .map(|c: &Component| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        ".".to_string()
    } else {
        normalized
    }
}
