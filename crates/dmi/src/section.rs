//! DMI sections and the dmidecode field alias tables.

use std::fmt;

use serde::{Deserialize, Serialize};
use sysattr_attrmap::SectionHandle;

/// DMI table section addressable through a dmidecode-style handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Section {
    Bios,
    System,
    Board,
    Chassis,
}

impl Section {
    /// Resolve a numeric dmidecode handle.
    ///
    /// # Arguments
    /// * `handle` - Handle value (`0x0`-`0x3`)
    pub fn from_handle(handle: u32) -> Option<Section> {
        match handle {
            0x0 => Some(Section::Bios),
            0x1 => Some(Section::System),
            0x2 => Some(Section::Board),
            0x3 => Some(Section::Chassis),
            _ => None,
        }
    }

    /// Resolve a section name, case-insensitively.
    ///
    /// # Arguments
    /// * `name` - Section name (e.g. `"bios"`, `"SYSTEM"`)
    pub fn from_name(name: &str) -> Option<Section> {
        match name.to_uppercase().as_str() {
            "BIOS" => Some(Section::Bios),
            "SYSTEM" => Some(Section::System),
            "BOARD" => Some(Section::Board),
            "CHASSIS" => Some(Section::Chassis),
            _ => None,
        }
    }

    /// Resolve a section handle in either form.
    ///
    /// String handles that parse as a hexadecimal number (with or without
    /// a `0x` prefix) are treated as numeric handles and must be known;
    /// only non-numeric strings fall back to name lookup.
    pub fn resolve(handle: &SectionHandle) -> Option<Section> {
        match handle {
            SectionHandle::Numeric(handle) => Section::from_handle(*handle),
            SectionHandle::Named(name) => {
                let trimmed: &str = name.trim();
                let digits: &str = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                match u32::from_str_radix(digits, 16) {
                    Ok(handle) => Section::from_handle(handle),
                    Err(_) => Section::from_name(trimmed),
                }
            }
        }
    }

    /// Canonical upper-case section name.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Bios => "BIOS",
            Section::System => "SYSTEM",
            Section::Board => "BOARD",
            Section::Chassis => "CHASSIS",
        }
    }

    /// Map a dmidecode field name to the sysfs attribute it aliases.
    ///
    /// Field names are matched exactly, as dmidecode prints them.
    ///
    /// # Arguments
    /// * `field` - dmidecode field name (e.g. `"Serial Number"`)
    pub fn alias(&self, field: &str) -> Option<&'static str> {
        let attr: &'static str = match (self, field) {
            (Section::Bios, "Vendor") => "bios_vendor",
            (Section::Bios, "Version") => "bios_version",
            (Section::Bios, "Release Date") => "bios_date",

            (Section::System, "Manufacturer") => "sys_vendor",
            (Section::System, "Product Name") => "product_name",
            (Section::System, "Version") => "product_version",
            (Section::System, "Serial Number") => "product_serial",
            (Section::System, "UUID") => "product_uuid",

            (Section::Board, "Manufacturer") => "board_vendor",
            (Section::Board, "Product Name") => "board_name",
            (Section::Board, "Version") => "board_version",
            (Section::Board, "Serial Number") => "board_serial",
            (Section::Board, "Asset Tag") => "board_asset_tag",

            (Section::Chassis, "Manufacturer") => "chassis_vendor",
            (Section::Chassis, "Type") => "chassis_type",
            (Section::Chassis, "Version") => "chassis_version",
            (Section::Chassis, "Serial Number") => "chassis_serial",
            (Section::Chassis, "Asset Tag") => "chassis_asset_tag",

            _ => return None,
        };
        Some(attr)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
