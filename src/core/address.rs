use serde::{Deserialize, Deserializer, Serialize};

/// One address extracted from an invoice.
///
/// Every field is optional: a missing value suppresses the scoring category
/// that depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAddress {
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub address1: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub zip_code: Option<String>,
}

impl InputAddress {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = non_blank(name.into());
        self
    }

    #[must_use]
    pub fn with_address1(mut self, line: impl Into<String>) -> Self {
        self.address1 = non_blank(line.into());
        self
    }

    #[must_use]
    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = non_blank(zip.into());
        self
    }
}

/// Header fields extracted from an invoice.
///
/// Only the fields the matcher reads are modelled; everything else the
/// extraction step produces (invoice number, amounts, bill-to address, ...)
/// is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub vendor_company_name: Option<String>,

    #[serde(default)]
    pub remit_to_address: Option<InputAddress>,

    #[serde(default)]
    pub other_supplier_addresses: Option<Vec<Option<InputAddress>>>,
}

impl PhaseData {
    /// Candidate addresses in priority order: remit-to first, then the other
    /// supplier addresses. Null entries are dropped.
    pub fn addresses(&self) -> Vec<&InputAddress> {
        self.remit_to_address
            .iter()
            .chain(
                self.other_supplier_addresses
                    .iter()
                    .flatten()
                    .filter_map(Option::as_ref),
            )
            .collect()
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Accept strings, numbers and booleans; blanks and nulls become `None`.
///
/// Extraction output is not always well typed (zip codes come back as numbers).
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => non_blank(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}
