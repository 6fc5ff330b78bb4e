//! Cached, read-only key/value access to sysfs-style attribute trees.
//!
//! This crate presents a directory of flat, single-value text files as a
//! lazily-populated mapping:
//! - `AttrMap` - the cached attribute mapping over a root directory
//! - `AttrMapping` - the read-only mapping protocol it implements
//! - `AttrStrategy` - pluggable key normalization and value deserialization
//! - `FetchOptions` - per-read cache bypass, refresh and error suppression
//!
//! Attribute files are expected to change rarely (hardware identifiers,
//! facts exported by the kernel at boot), so values are cached on first
//! read and served from memory afterwards; callers opt into re-reads
//! explicitly. The mapping is read-only by design and synchronous: every
//! read is one blocking filesystem call, and there is no internal locking.

pub mod error;
pub mod key;
pub mod mapping;
pub mod strategy;
pub mod value;

// Re-export the public surface at crate root
pub use error::AttrMapError;
pub use key::{normalize_path_key, RawKey, SectionHandle};
pub use mapping::{AttrItems, AttrMap, AttrMapping, FetchOptions};
pub use strategy::{AttrStrategy, DefaultStrategy};
pub use value::AttrValue;
