use thiserror::Error;
use tracing::debug;

use crate::core::address::{InputAddress, PhaseData};
use crate::core::vendor::VendorRecord;
use crate::matching::scoring::score_address;
use crate::matching::selection::{select_top_candidates, ScoredCandidate, MAX_RESULTS};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatchError {
    #[error("Vendor record {index} has no account number")]
    MissingAccountNumber { index: usize },
}

/// Result of matching one invoice against the vendor list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    /// Best candidates, highest score first (at most `result_limit`)
    pub candidates: Vec<ScoredCandidate>,

    /// Priority index of the address that produced `candidates`
    /// (0 = remit-to address); `None` when nothing matched
    pub address_index: Option<usize>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

/// Default minimum score threshold for matches
pub const DEFAULT_MIN_SCORE: f64 = 38.0;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Candidates must score strictly above this
    pub min_score: f64,
    /// Match against Canadian vendors instead of everyone else
    pub is_canadian: bool,
    /// Maximum number of candidates returned
    pub result_limit: usize,
    /// Emit a debug event for every scored (address, vendor) pair
    pub trace_scoring: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            is_canadian: false,
            result_limit: MAX_RESULTS,
            trace_scoring: false,
        }
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    vendors: &'a [VendorRecord],
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(vendors: &'a [VendorRecord]) -> Self {
        Self {
            vendors,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(vendors: &'a [VendorRecord], config: MatchingConfig) -> Self {
        Self { vendors, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find the best vendor records for an invoice.
    ///
    /// Addresses are tried in priority order (remit-to first) and the first
    /// one that yields any candidates wins; later addresses are never scored.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::MissingAccountNumber` if any vendor record has a
    /// blank account number, since it cannot be assigned to a country.
    pub fn find_matches(&self, phase: &PhaseData) -> Result<MatchResult, MatchError> {
        let vendors = self.country_vendors()?;
        let vendor_company_name = phase.vendor_company_name.as_deref();

        debug!(
            "Matching against {} of {} vendor records ({})",
            vendors.len(),
            self.vendors.len(),
            if self.config.is_canadian { "Canadian" } else { "non-Canadian" }
        );

        for (index, address) in phase.addresses().into_iter().enumerate() {
            let scored = self.score_vendors(address, vendor_company_name, &vendors);
            let candidates =
                select_top_candidates(scored, self.config.min_score, self.config.result_limit);

            debug!("Address {index}: {} candidate(s) selected", candidates.len());

            if !candidates.is_empty() {
                return Ok(MatchResult {
                    candidates,
                    address_index: Some(index),
                });
            }
        }

        Ok(MatchResult::default())
    }

    /// Score one address against every vendor record of the configured
    /// country, without applying the selection rules. Highest score first.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::MissingAccountNumber` if any vendor record has a
    /// blank account number.
    pub fn score_all(
        &self,
        address: &InputAddress,
        vendor_company_name: Option<&str>,
    ) -> Result<Vec<ScoredCandidate>, MatchError> {
        let vendors = self.country_vendors()?;
        let mut scored = self.score_vendors(address, vendor_company_name, &vendors);
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(scored)
    }

    /// Vendor records belonging to the configured country bucket
    fn country_vendors(&self) -> Result<Vec<&'a VendorRecord>, MatchError> {
        let vendors: &'a [VendorRecord] = self.vendors;
        let mut selected = Vec::with_capacity(vendors.len());
        for (index, vendor) in vendors.iter().enumerate() {
            if vendor.account_number.trim().is_empty() {
                return Err(MatchError::MissingAccountNumber { index });
            }
            if vendor.is_canadian() == self.config.is_canadian {
                selected.push(vendor);
            }
        }
        Ok(selected)
    }

    fn score_vendors(
        &self,
        address: &InputAddress,
        vendor_company_name: Option<&str>,
        vendors: &[&VendorRecord],
    ) -> Vec<ScoredCandidate> {
        vendors
            .iter()
            .map(|&vendor| {
                let score =
                    score_address(address, vendor_company_name, vendor, self.config.trace_scoring);
                ScoredCandidate::new(vendor.clone(), &score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendors() -> Vec<VendorRecord> {
        vec![
            VendorRecord::new("V100")
                .with_organization_name("ACME WIDGETS INC")
                .with_street("PO BOX 1234")
                .with_zip_code("75201-1234"),
            VendorRecord::new("V200")
                .with_organization_name("GLOBEX CORPORATION")
                .with_street("500 INDUSTRIAL PKWY")
                .with_zip_code("44101"),
            VendorRecord::new("VCA300")
                .with_organization_name("ACME WIDGETS CANADA")
                .with_street("PO BOX 1234")
                .with_zip_code("M5V 2T6"),
        ]
    }

    fn acme_address() -> InputAddress {
        InputAddress::new()
            .with_company_name("Acme Widgets")
            .with_address1("PO Box 1234")
            .with_zip_code("75201-1234")
    }

    #[test]
    fn test_find_matches_remit_to() {
        let vendors = vendors();
        let engine = MatchingEngine::new(&vendors);
        let phase = PhaseData {
            vendor_company_name: Some("Acme Widgets".to_string()),
            remit_to_address: Some(acme_address()),
            other_supplier_addresses: None,
        };

        let result = engine.find_matches(&phase).unwrap();
        assert_eq!(result.address_index, Some(0));
        assert_eq!(result.len(), 1);
        assert_eq!(result.candidates[0].record.account_number, "V100");
        assert_eq!(result.candidates[0].no_of_matches, 3);
    }

    #[test]
    fn test_find_matches_falls_through_addresses() {
        let vendors = vendors();
        let engine = MatchingEngine::new(&vendors);
        let phase = PhaseData {
            vendor_company_name: None,
            remit_to_address: Some(InputAddress::new().with_company_name("Initech")),
            other_supplier_addresses: Some(vec![None, Some(acme_address())]),
        };

        let result = engine.find_matches(&phase).unwrap();
        assert_eq!(result.address_index, Some(1));
        assert_eq!(result.candidates[0].record.account_number, "V100");
    }

    #[test]
    fn test_find_matches_none() {
        let vendors = vendors();
        let engine = MatchingEngine::new(&vendors);
        let phase = PhaseData {
            vendor_company_name: None,
            remit_to_address: Some(InputAddress::new().with_zip_code("99999")),
            other_supplier_addresses: None,
        };

        let result = engine.find_matches(&phase).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.address_index, None);
    }

    #[test]
    fn test_country_filter() {
        let vendors = vendors();
        let address = acme_address();

        let engine = MatchingEngine::new(&vendors);
        let scored = engine.score_all(&address, None).unwrap();
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|c| !c.record.account_number.starts_with("VCA")));

        let config = MatchingConfig {
            is_canadian: true,
            ..MatchingConfig::default()
        };
        let engine = MatchingEngine::with_config(&vendors, config);
        let scored = engine.score_all(&address, None).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].record.account_number, "VCA300");
    }

    #[test]
    fn test_blank_account_number_rejected() {
        let mut vendors = vendors();
        vendors.push(VendorRecord::new(" "));
        let engine = MatchingEngine::new(&vendors);

        let phase = PhaseData {
            vendor_company_name: None,
            remit_to_address: Some(acme_address()),
            other_supplier_addresses: None,
        };
        assert_eq!(
            engine.find_matches(&phase),
            Err(MatchError::MissingAccountNumber { index: 3 })
        );
    }

    #[test]
    fn test_score_all_sorted() {
        let vendors = vendors();
        let engine = MatchingEngine::new(&vendors);
        let scored = engine.score_all(&acme_address(), None).unwrap();
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(scored[0].record.account_number, "V100");
    }
}
