use serde::Serialize;
use std::collections::BTreeMap;

/// Column holding the vendor account number (required)
pub const ACCOUNT_NUMBER_COLUMN: &str = "VENDORACCOUNTNUMBER";
/// Column holding the vendor organization name
pub const ORGANIZATION_NAME_COLUMN: &str = "VENDORORGANIZATIONNAME";
/// Column holding the street line (may contain several lines)
pub const STREET_COLUMN: &str = "ADDRESSSTREET";
/// Column holding the zip / postal code
pub const ZIP_CODE_COLUMN: &str = "ADDRESSZIPCODE";
/// Column holding free-text address description
pub const DESCRIPTION_COLUMN: &str = "ADDRESSDESCRIPTION";

/// Columns the matcher reads; everything else is passed through untouched
pub const KNOWN_COLUMNS: [&str; 5] = [
    ACCOUNT_NUMBER_COLUMN,
    ORGANIZATION_NAME_COLUMN,
    STREET_COLUMN,
    ZIP_CODE_COLUMN,
    DESCRIPTION_COLUMN,
];

/// Account-number prefix reserved for Canadian vendors (compared case-insensitively)
pub const CANADIAN_ACCOUNT_PREFIX: &str = "vca";

/// One row of the vendor master list.
///
/// Serializes with the master list's column names so callers get back the
/// row they supplied; columns the matcher does not read are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorRecord {
    #[serde(rename = "VENDORACCOUNTNUMBER")]
    pub account_number: String,

    #[serde(rename = "VENDORORGANIZATIONNAME", skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,

    #[serde(rename = "ADDRESSSTREET", skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(rename = "ADDRESSZIPCODE", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(rename = "ADDRESSDESCRIPTION", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Any other columns from the source row
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl VendorRecord {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_organization_name(mut self, name: impl Into<String>) -> Self {
        self.organization_name = non_blank(name.into());
        self
    }

    #[must_use]
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = non_blank(street.into());
        self
    }

    #[must_use]
    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = non_blank(zip.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Build a record from a row whose keys are already canonical column names.
    ///
    /// Returns `None` when the account number is missing or blank; the caller
    /// decides how to report that.
    pub fn from_columns(mut columns: BTreeMap<String, String>) -> Option<Self> {
        let account_number = columns
            .remove(ACCOUNT_NUMBER_COLUMN)
            .and_then(non_blank)?;

        let mut take = |key: &str| columns.remove(key).and_then(non_blank);
        let organization_name = take(ORGANIZATION_NAME_COLUMN);
        let street = take(STREET_COLUMN);
        let zip_code = take(ZIP_CODE_COLUMN);
        let description = take(DESCRIPTION_COLUMN);

        Some(Self {
            account_number,
            organization_name,
            street,
            zip_code,
            description,
            extra: columns,
        })
    }

    /// Whether the account number carries the Canadian prefix
    pub fn is_canadian(&self) -> bool {
        self.account_number
            .to_lowercase()
            .starts_with(CANADIAN_ACCOUNT_PREFIX)
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
