//! Embedded data files consumed at generator construction.
//!
//! The deliverable bundles three compressed network definitions and two
//! helper documents under `data_points/`. [`data_file`] is the name-based
//! lookup the generators use; the contents are opaque byte blobs until the
//! loaders decode them.

const INPUT_NETWORK: &[u8] = include_bytes!("../data_points/input-network-definition.zip");
const HEADER_NETWORK: &[u8] = include_bytes!("../data_points/header-network-definition.zip");
const FINGERPRINT_NETWORK: &[u8] =
    include_bytes!("../data_points/fingerprint-network-definition.zip");
const UNIQUE_BROWSERS: &[u8] = include_bytes!("../data_points/browser-helper-file.json");
const HEADERS_ORDER: &[u8] = include_bytes!("../data_points/headers-order.json");

/// Look up an embedded data file by its `data_points/` name.
pub fn data_file(name: &str) -> Option<&'static [u8]> {
    match name {
        "input-network-definition.zip" => Some(INPUT_NETWORK),
        "header-network-definition.zip" => Some(HEADER_NETWORK),
        "fingerprint-network-definition.zip" => Some(FINGERPRINT_NETWORK),
        "browser-helper-file.json" => Some(UNIQUE_BROWSERS),
        "headers-order.json" => Some(HEADERS_ORDER),
        _ => None,
    }
}
