//! DMI system information through `/sys/class/dmi/id`.
//!
//! A thin configuration of [`sysattr_attrmap`]: the cached attribute
//! mapping, instantiated with DMI-aware key normalization and value
//! deserialization.
//!
//! - [`dmi_id_info`] - attribute-path keys (`sys_vendor`, `bios_date`, ...)
//! - [`dmi_info`] - additionally accepts dmidecode-style
//!   `(section, field)` keys, resolved through fixed alias tables
//!
//! Both return plain [`AttrMap`]s; everything else (caching, refresh,
//! bulk retrieval) behaves as documented there. Placeholder text left in
//! unpopulated firmware fields ("Not Available", "To be filled...")
//! deserializes to [`AttrValue::NoValue`](sysattr_attrmap::AttrValue).

pub mod section;
pub mod strategy;

pub use section::Section;
pub use strategy::{dmi_value, DmiIdStrategy, DmiStrategy};

use std::path::Path;

use sysattr_attrmap::AttrMap;

/// Default location of the DMI id attribute tree.
pub const DMI_ID_ROOT: &str = "/sys/class/dmi/id";

/// DMI id view with plain attribute-path keys.
pub fn dmi_id_info() -> AttrMap {
    dmi_id_info_at(DMI_ID_ROOT)
}

/// DMI id view with plain attribute-path keys over a non-standard root.
///
/// # Arguments
/// * `root` - Directory containing the DMI id attribute files
pub fn dmi_id_info_at(root: impl AsRef<Path>) -> AttrMap {
    AttrMap::with_strategy(root, DmiIdStrategy)
}

/// DMI id view that also resolves dmidecode-style keys.
pub fn dmi_info() -> AttrMap {
    dmi_info_at(DMI_ID_ROOT)
}

/// DMI id view resolving dmidecode-style keys over a non-standard root.
///
/// # Arguments
/// * `root` - Directory containing the DMI id attribute files
pub fn dmi_info_at(root: impl AsRef<Path>) -> AttrMap {
    AttrMap::with_strategy(root, DmiStrategy)
}
