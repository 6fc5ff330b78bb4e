//! Cached, read-only attribute mapping over a directory of text files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::AttrMapError;
use crate::key::RawKey;
use crate::strategy::{AttrStrategy, DefaultStrategy};
use crate::value::AttrValue;

/// Options controlling a single read-through fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Skip the value cache entirely: read from the filesystem and do not
    /// store the result.
    pub bypass: bool,
    /// Evict any cached value before the lookup, forcing a filesystem read.
    pub refresh: bool,
    /// Swallow read failures other than absence and return `fallback`
    /// instead. The fallback is never cached. Absence is always reported
    /// as [`AttrMapError::NotFound`].
    pub suppress_errors: bool,
    /// Value returned for suppressed read failures.
    pub fallback: AttrValue,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            bypass: false,
            refresh: false,
            suppress_errors: false,
            fallback: AttrValue::NoValue,
        }
    }
}

impl FetchOptions {
    /// Options for best-effort bulk retrieval: read failures are
    /// suppressed, everything else as per [`Default`].
    pub fn tolerant() -> Self {
        Self {
            suppress_errors: true,
            ..Self::default()
        }
    }
}

/// Read-only mapping protocol over canonical attribute keys.
///
/// Implementations present a directory of single-value text files with
/// key/value semantics: membership test, size, key enumeration, and item
/// lookup. Looking up a key whose file does not exist fails with
/// [`AttrMapError::NotFound`]; this is part of the contract, not an
/// implementation detail.
pub trait AttrMapping {
    /// Check whether the given attribute exists.
    fn contains_key(&self, key: &RawKey) -> bool;

    /// Number of known attribute keys.
    fn len(&self) -> usize;

    /// Whether the mapping knows of any attributes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All known canonical attribute keys.
    fn keys(&self) -> HashSet<String>;

    /// Look up a single attribute value.
    ///
    /// # Errors
    /// [`AttrMapError::NotFound`] if the attribute file does not exist,
    /// [`AttrMapError::InvalidKey`] if the key cannot be normalized, and
    /// [`AttrMapError::Read`] for any other filesystem failure.
    fn get_item(&mut self, key: &RawKey) -> Result<AttrValue, AttrMapError>;
}

/// Cached view of a sysfs-style attribute tree.
///
/// Reads single-value text files under a fixed root directory and caches
/// the deserialized results in memory. Intended for attributes that change
/// rarely (hardware identifiers, boot-time kernel facts); callers that know
/// a file changed can force a re-read via [`FetchOptions::refresh`] or peek
/// without caching via [`FetchOptions::bypass`].
///
/// Two caches back the mapping: a lazily populated value cache and a
/// filename snapshot of the root's immediate children, taken at
/// construction and on [`clear`](AttrMap::clear). Neither cache has
/// internal locking; concurrent use requires external synchronization.
pub struct AttrMap {
    /// Absolute root of the attribute tree. Fixed for the mapping's
    /// lifetime.
    root: PathBuf,
    /// Canonical key -> deserialized value, populated on first read.
    value_cache: HashMap<String, AttrValue>,
    /// Names of the root's immediate non-directory children, as of the
    /// last snapshot.
    filename_cache: HashSet<String>,
    /// Key normalization and value deserialization.
    strategy: Box<dyn AttrStrategy>,
}

impl AttrMap {
    /// Create a mapping over `root` with the default strategy.
    ///
    /// # Arguments
    /// * `root` - Directory containing the attribute files
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_strategy(root, DefaultStrategy)
    }

    /// Create a mapping over `root` with a custom strategy.
    ///
    /// The root is resolved to an absolute path without touching the
    /// filesystem. Construction never fails: a missing or unlistable root
    /// simply yields an empty filename snapshot.
    ///
    /// # Arguments
    /// * `root` - Directory containing the attribute files
    /// * `strategy` - Key normalization and value deserialization
    pub fn with_strategy(root: impl AsRef<Path>, strategy: impl AttrStrategy + 'static) -> Self {
        let root: PathBuf = to_absolute(root.as_ref());
        let filename_cache: HashSet<String> = snapshot_filenames(&root);
        Self {
            root,
            value_cache: HashMap::new(),
            filename_cache,
            strategy: Box::new(strategy),
        }
    }

    /// The absolute root of the attribute tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute filesystem path of a canonical key.
    ///
    /// # Arguments
    /// * `normkey` - Canonical attribute key
    pub fn fspath(&self, normkey: &str) -> PathBuf {
        self.root.join(normkey)
    }

    /// Normalize a raw key through the mapping's strategy.
    ///
    /// # Errors
    /// [`AttrMapError::InvalidKey`] if the strategy cannot resolve the key.
    ///
    /// # Panics
    /// If the strategy produces an empty canonical key; that is a defect
    /// in the strategy, not a runtime condition callers should handle.
    pub fn normalize(&self, key: impl Into<RawKey>) -> Result<String, AttrMapError> {
        let raw: RawKey = key.into();
        let normkey: String = self.strategy.normalize(&raw)?;
        assert!(
            !normkey.is_empty(),
            "strategy produced an empty canonical key for {}",
            raw
        );
        Ok(normkey)
    }

    /// Check whether the given attribute exists.
    ///
    /// Consults the value cache and the filename snapshot first so that
    /// top-level lookups cost no filesystem access. Only keys that refer
    /// to a nested path fall through to an `is_file` probe; everything
    /// else is reported absent. A positive result does not imply the
    /// attribute is readable. Keys the strategy cannot resolve are not
    /// contained.
    pub fn contains(&self, key: impl Into<RawKey>) -> bool {
        let normkey: String = match self.normalize(key) {
            Ok(normkey) => normkey,
            Err(_) => return false,
        };

        if self.value_cache.contains_key(&normkey) {
            true
        } else if self.filename_cache.contains(&normkey) {
            true
        } else if normkey.contains('/') {
            self.fspath(&normkey).is_file()
        } else {
            false
        }
    }

    /// All known canonical attribute keys.
    ///
    /// The union of the value cache and the filename snapshot. Deep
    /// attributes (below a subdirectory) appear only once they have been
    /// read.
    pub fn keys(&self) -> HashSet<String> {
        self.value_cache
            .keys()
            .cloned()
            .chain(self.filename_cache.iter().cloned())
            .collect()
    }

    /// Number of known attribute keys.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Whether the mapping knows of any attributes.
    pub fn is_empty(&self) -> bool {
        self.value_cache.is_empty() && self.filename_cache.is_empty()
    }

    /// Look up a single attribute value, reading through the cache.
    ///
    /// # Errors
    /// See [`AttrMapping::get_item`].
    pub fn get_item(&mut self, key: impl Into<RawKey>) -> Result<AttrValue, AttrMapError> {
        let normkey: String = self.normalize(key)?;
        self.fetch(&normkey, &FetchOptions::default())
    }

    /// Read-through primitive over a canonical key.
    ///
    /// Unless bypassed, a cached value is returned immediately; this is
    /// the only path that avoids a filesystem read. On a successful read
    /// the deserialized value is cached (again, unless bypassed).
    ///
    /// # Arguments
    /// * `normkey` - Canonical attribute key
    /// * `options` - Cache and error-suppression behavior
    ///
    /// # Errors
    /// [`AttrMapError::NotFound`] if the file is absent, regardless of
    /// `suppress_errors`; [`AttrMapError::Read`] for other failures unless
    /// suppressed.
    pub fn fetch(&mut self, normkey: &str, options: &FetchOptions) -> Result<AttrValue, AttrMapError> {
        if options.refresh {
            // A stale entry must not satisfy the lookup below.
            self.value_cache.remove(normkey);
        } else if !options.bypass {
            if let Some(value) = self.value_cache.get(normkey) {
                return Ok(value.clone());
            }
        }

        let value: AttrValue = match self.read_attr(normkey) {
            Ok(value) => value,
            Err(err) if err.is_not_found() => return Err(err),
            Err(err) => {
                if options.suppress_errors {
                    // The fallback is never cached.
                    log::warn!("suppressing read failure for {}: {}", normkey, err);
                    return Ok(options.fallback.clone());
                }
                return Err(err);
            }
        };

        if !options.bypass {
            self.value_cache.insert(normkey.to_string(), value.clone());
        }
        Ok(value)
    }

    /// Tolerant lookup: like [`get_item`](AttrMap::get_item) but a missing
    /// attribute yields [`AttrValue::NoValue`] instead of failing.
    ///
    /// # Errors
    /// Read failures and invalid keys still propagate.
    pub fn get(&mut self, key: impl Into<RawKey>) -> Result<AttrValue, AttrMapError> {
        self.get_or(key, AttrValue::NoValue)
    }

    /// Tolerant lookup with an explicit fallback for missing attributes.
    pub fn get_or(
        &mut self,
        key: impl Into<RawKey>,
        fallback: AttrValue,
    ) -> Result<AttrValue, AttrMapError> {
        self.get_with(key, fallback, &FetchOptions::default())
    }

    /// Tolerant lookup with full control over the fetch behavior.
    ///
    /// `fallback` covers the missing-attribute case; suppressed read
    /// failures yield `options.fallback`.
    pub fn get_with(
        &mut self,
        key: impl Into<RawKey>,
        fallback: AttrValue,
        options: &FetchOptions,
    ) -> Result<AttrValue, AttrMapError> {
        let normkey: String = self.normalize(key)?;
        self.get_norm(&normkey, &fallback, options)
    }

    /// Tolerant lookup over an already-canonical key.
    fn get_norm(
        &mut self,
        normkey: &str,
        fallback: &AttrValue,
        options: &FetchOptions,
    ) -> Result<AttrValue, AttrMapError> {
        match self.fetch(normkey, options) {
            Err(err) if err.is_not_found() => Ok(fallback.clone()),
            other => other,
        }
    }

    /// Lazy iterator of `(canonical key, value)` pairs for the given keys,
    /// in input order, with read failures suppressed.
    ///
    /// Each step performs at most one bounded filesystem read. The
    /// iterator yields `Err` only for keys the strategy cannot resolve.
    pub fn iter_attributes<I>(&mut self, keys: I) -> AttrItems<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<RawKey>,
    {
        self.iter_attributes_with(keys, FetchOptions::tolerant())
    }

    /// Lazy iterator of `(canonical key, value)` pairs with explicit
    /// fetch options.
    pub fn iter_attributes_with<I>(&mut self, keys: I, options: FetchOptions) -> AttrItems<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<RawKey>,
    {
        AttrItems {
            map: self,
            keys: keys.into_iter(),
            options,
        }
    }

    /// Collect `(canonical key, value)` pairs for the given keys, in input
    /// order, with read failures suppressed.
    ///
    /// Intended for best-effort dumps: a missing or unreadable attribute
    /// yields the fallback value rather than failing the whole batch.
    ///
    /// # Errors
    /// [`AttrMapError::InvalidKey`] if any key cannot be normalized.
    pub fn get_attributes<I>(&mut self, keys: I) -> Result<Vec<(String, AttrValue)>, AttrMapError>
    where
        I: IntoIterator,
        I::Item: Into<RawKey>,
    {
        self.iter_attributes(keys).collect()
    }

    /// Collect `(canonical key, value)` pairs with explicit fetch options.
    ///
    /// # Errors
    /// [`AttrMapError::InvalidKey`] for unresolvable keys; read failures
    /// propagate when `options.suppress_errors` is unset.
    pub fn get_attributes_with<I>(
        &mut self,
        keys: I,
        options: FetchOptions,
    ) -> Result<Vec<(String, AttrValue)>, AttrMapError>
    where
        I: IntoIterator,
        I::Item: Into<RawKey>,
    {
        self.iter_attributes_with(keys, options).collect()
    }

    /// Like [`get_attributes`](AttrMap::get_attributes), but ordered by
    /// canonical key instead of input order.
    ///
    /// # Errors
    /// [`AttrMapError::InvalidKey`] if any key cannot be normalized.
    pub fn get_attributes_sorted<I>(
        &mut self,
        keys: I,
    ) -> Result<Vec<(String, AttrValue)>, AttrMapError>
    where
        I: IntoIterator,
        I::Item: Into<RawKey>,
    {
        let mut normkeys: Vec<String> = keys
            .into_iter()
            .map(|key| self.normalize(key))
            .collect::<Result<Vec<String>, AttrMapError>>()?;
        normkeys.sort();
        self.get_attributes(normkeys)
    }

    /// All known attributes as `(canonical key, value)` pairs, with read
    /// failures suppressed.
    ///
    /// # Arguments
    /// * `sort_keys` - Sort the output by key instead of hash order
    pub fn items(&mut self, sort_keys: bool) -> Result<Vec<(String, AttrValue)>, AttrMapError> {
        let mut keys: Vec<String> = self.keys().into_iter().collect();
        if sort_keys {
            keys.sort();
        }
        self.get_attributes(keys)
    }

    /// Values of all known attributes, with read failures suppressed.
    pub fn values(&mut self) -> Result<Vec<AttrValue>, AttrMapError> {
        Ok(self
            .items(false)?
            .into_iter()
            .map(|(_, value): (String, AttrValue)| value)
            .collect())
    }

    /// Remove a single entry from the value cache.
    ///
    /// No-op if the key is not cached or cannot be resolved (an
    /// unresolvable key can never have been cached). The filename
    /// snapshot is untouched.
    pub fn drop_cached(&mut self, key: impl Into<RawKey>) {
        if let Ok(normkey) = self.normalize(key) {
            self.value_cache.remove(&normkey);
        }
    }

    /// Empty the value cache and rebuild the filename snapshot from the
    /// filesystem.
    pub fn clear(&mut self) {
        self.value_cache.clear();
        self.filename_cache = snapshot_filenames(&self.root);
    }

    /// Read an attribute file in full and deserialize it.
    fn read_attr(&self, normkey: &str) -> Result<AttrValue, AttrMapError> {
        let text: String = fs::read_to_string(self.fspath(normkey))
            .map_err(|e: std::io::Error| AttrMapError::from_io(normkey, e))?;
        Ok(self.strategy.deserialize(normkey, &text))
    }
}

impl AttrMapping for AttrMap {
    fn contains_key(&self, key: &RawKey) -> bool {
        self.contains(key.clone())
    }

    fn len(&self) -> usize {
        AttrMap::len(self)
    }

    fn is_empty(&self) -> bool {
        AttrMap::is_empty(self)
    }

    fn keys(&self) -> HashSet<String> {
        AttrMap::keys(self)
    }

    fn get_item(&mut self, key: &RawKey) -> Result<AttrValue, AttrMapError> {
        AttrMap::get_item(self, key.clone())
    }
}

/// Lazy `(canonical key, value)` iterator returned by
/// [`AttrMap::iter_attributes`].
///
/// Restartable in the sense that each call to `iter_attributes` produces
/// a fresh iterator; consumed keys are not remembered across calls.
pub struct AttrItems<'a, I> {
    map: &'a mut AttrMap,
    keys: I,
    options: FetchOptions,
}

impl<'a, I, K> Iterator for AttrItems<'a, I>
where
    I: Iterator<Item = K>,
    K: Into<RawKey>,
{
    type Item = Result<(String, AttrValue), AttrMapError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw: RawKey = self.keys.next()?.into();
        let normkey: String = match self.map.normalize(raw) {
            Ok(normkey) => normkey,
            Err(err) => return Some(Err(err)),
        };
        let fallback: AttrValue = self.options.fallback.clone();
        match self.map.get_norm(&normkey, &fallback, &self.options) {
            Ok(value) => Some(Ok((normkey, value))),
            Err(err) => Some(Err(err)),
        }
    }
}

/// Resolve a path to absolute without touching the filesystem.
///
/// Relative paths are joined onto the current directory; if that cannot
/// be determined the path is kept as given, since construction must not
/// fail.
fn to_absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    }
}

/// Snapshot the names of a directory's immediate non-directory children.
///
/// A missing or unreadable root yields an empty set.
fn snapshot_filenames(root: &Path) -> HashSet<String> {
    let mut names: HashSet<String> = HashSet::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1).into_iter() {
        let entry: walkdir::DirEntry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        // Directories (and symlinks to directories) are not attributes.
        if !entry.path().is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names
}
