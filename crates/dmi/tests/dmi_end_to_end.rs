//! End-to-end tests over a fixture DMI id tree.

use std::fs;
use std::path::Path;

use sysattr_attrmap::{AttrMap, AttrMapError, AttrValue};
use sysattr_dmi::{dmi_id_info_at, dmi_info_at};
use tempfile::TempDir;

fn write_attr(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn create_dmi_tree(dir: &Path) {
    write_attr(dir, "sys_vendor", "Acme Corp  \n\n");
    write_attr(dir, "product_name", "Rack Server 9000\n");
    write_attr(dir, "product_serial", "Not Available\n");
    write_attr(dir, "board_asset_tag", "To Be Filled By O.E.M.\n");
    write_attr(dir, "bios_date", "04/01/2024\n");
}

#[test]
fn test_vendor_serial_dump_in_input_order() {
    let dir: TempDir = TempDir::new().unwrap();
    write_attr(dir.path(), "vendor", "Acme Corp\n");
    write_attr(dir.path(), "serial", "Not Available\n");

    let mut dmi: AttrMap = dmi_id_info_at(dir.path());
    let attrs: Vec<(String, AttrValue)> = dmi.get_attributes(["vendor", "serial"]).unwrap();

    assert_eq!(
        attrs,
        vec![
            ("vendor".to_string(), AttrValue::from("Acme Corp")),
            ("serial".to_string(), AttrValue::NoValue),
        ]
    );
}

#[test]
fn test_placeholder_values_deserialize_to_no_value() {
    let dir: TempDir = TempDir::new().unwrap();
    create_dmi_tree(dir.path());

    let mut dmi: AttrMap = dmi_id_info_at(dir.path());
    assert_eq!(dmi.get_item("sys_vendor").unwrap(), AttrValue::from("Acme Corp"));
    assert_eq!(dmi.get_item("product_serial").unwrap(), AttrValue::NoValue);
    assert_eq!(dmi.get_item("board_asset_tag").unwrap(), AttrValue::NoValue);
}

#[test]
fn test_no_value_is_cached_like_any_value() {
    let dir: TempDir = TempDir::new().unwrap();
    write_attr(dir.path(), "product_serial", "Not Available\n");

    let mut dmi: AttrMap = dmi_id_info_at(dir.path());
    assert_eq!(dmi.get_item("product_serial").unwrap(), AttrValue::NoValue);

    // NoValue means "exists, nothing usable": the key stays present.
    fs::remove_file(dir.path().join("product_serial")).unwrap();
    assert!(dmi.contains("product_serial"));
    assert_eq!(dmi.get_item("product_serial").unwrap(), AttrValue::NoValue);
}

#[test]
fn test_dmidecode_style_lookups() {
    let dir: TempDir = TempDir::new().unwrap();
    create_dmi_tree(dir.path());

    let mut dmi: AttrMap = dmi_info_at(dir.path());

    // Numeric handle, name, and path forms all reach the same attribute.
    assert_eq!(
        dmi.get_item((1, "Manufacturer")).unwrap(),
        AttrValue::from("Acme Corp")
    );
    assert_eq!(
        dmi.get_item(("system", "Manufacturer")).unwrap(),
        AttrValue::from("Acme Corp")
    );
    assert_eq!(
        dmi.get_item("SYSTEM/Manufacturer").unwrap(),
        AttrValue::from("Acme Corp")
    );
    assert_eq!(dmi.get_item("sys_vendor").unwrap(), AttrValue::from("Acme Corp"));

    // All spellings share one cache entry under the canonical key.
    fs::remove_file(dir.path().join("sys_vendor")).unwrap();
    assert_eq!(
        dmi.get_item(("SYSTEM", "Manufacturer")).unwrap(),
        AttrValue::from("Acme Corp")
    );

    assert_eq!(
        dmi.get_item((0, "Release Date")).unwrap(),
        AttrValue::from("04/01/2024")
    );
    assert_eq!(dmi.get_item(("SYSTEM", "Serial Number")).unwrap(), AttrValue::NoValue);
}

#[test]
fn test_unknown_pair_fails_with_invalid_key() {
    let dir: TempDir = TempDir::new().unwrap();
    create_dmi_tree(dir.path());

    let mut dmi: AttrMap = dmi_info_at(dir.path());
    let result: Result<AttrValue, AttrMapError> = dmi.get_item((9, "Manufacturer"));
    assert!(matches!(result, Err(AttrMapError::InvalidKey { .. })));

    let result: Result<AttrValue, AttrMapError> = dmi.get_item(("system", "Flux Capacity"));
    assert!(matches!(result, Err(AttrMapError::InvalidKey { .. })));
}

#[test]
fn test_unaliased_path_keys_still_work() {
    let dir: TempDir = TempDir::new().unwrap();
    create_dmi_tree(dir.path());
    fs::create_dir(dir.path().join("power")).unwrap();
    write_attr(&dir.path().join("power"), "wakeup", "disabled\n");

    let mut dmi: AttrMap = dmi_info_at(dir.path());
    assert_eq!(
        dmi.get_item("power/wakeup").unwrap(),
        AttrValue::from("disabled")
    );
}

#[test]
fn test_keys_reflect_fixture_tree() {
    let dir: TempDir = TempDir::new().unwrap();
    create_dmi_tree(dir.path());

    let dmi: AttrMap = dmi_info_at(dir.path());
    assert_eq!(dmi.len(), 5);
    assert!(dmi.contains("sys_vendor"));
    assert!(dmi.contains((1, "Manufacturer")));
    assert!(!dmi.contains((3, "Serial Number")));
}

#[test]
fn test_missing_dmi_tree_is_empty_not_an_error() {
    let dmi: AttrMap = dmi_info_at("/nonexistent/dmi/id");
    assert!(dmi.is_empty());
}
