//! Centralized validation and helper functions.

use std::path::Path;

/// Maximum number of vendor records accepted in one batch (DOS protection)
pub const MAX_VENDOR_RECORDS: usize = 1_000_000;

/// UTF-8 byte-order mark as decoded text
const BOM: char = '\u{feff}';

/// UTF-8 byte-order mark mis-decoded as Latin-1
const BOM_MOJIBAKE: &str = "ï»¿";

/// Check if adding another vendor record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_vendor_limit(count: usize) -> Option<String> {
    if count >= MAX_VENDOR_RECORDS {
        Some(format!(
            "Too many vendor records: adding another would exceed maximum of {MAX_VENDOR_RECORDS}"
        ))
    } else {
        None
    }
}

/// Canonical form of a vendor column name.
///
/// Trims whitespace, removes a leading byte-order mark (either decoded or
/// mis-decoded as `ï»¿`) and upper-cases, so `"\u{feff}VendorOrganizationName"`,
/// `"ï»¿VENDORORGANIZATIONNAME"` and `"vendorOrganizationName"` all map to
/// `"VENDORORGANIZATIONNAME"`.
///
/// # Examples
///
/// ```
/// use vendor_matcher::utils::validation::normalize_column_name;
///
/// assert_eq!(normalize_column_name("\u{feff}VENDORACCOUNTNUMBER"), "VENDORACCOUNTNUMBER");
/// assert_eq!(normalize_column_name("ï»¿VENDORORGANIZATIONNAME"), "VENDORORGANIZATIONNAME");
/// assert_eq!(normalize_column_name(" addressZipCode "), "ADDRESSZIPCODE");
/// ```
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    let name = name.trim_start_matches(BOM);
    let name = name.strip_prefix(BOM_MOJIBAKE).unwrap_or(name);
    name.trim().to_uppercase()
}

/// Whether a path names a CSV file (case-insensitive extension)
#[must_use]
pub fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
