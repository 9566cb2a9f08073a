//! Vendor matching engine and scoring rules.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: Main entry point, walks an invoice's addresses in priority order
//! - [`AddressScore`]: Composite score of one address against one vendor record
//! - [`select_top_candidates`]: Threshold and tie-break policy over scored records
//!
//! ## Matching Algorithm
//!
//! For each input address (remit-to first, then other supplier addresses):
//!
//! 1. **Country filter**: Vendor accounts prefixed `VCA` are Canadian; only the
//!    requested country's records are considered
//! 2. **Scoring**: Every record is scored on zip code, street / PO box, and
//!    company name
//! 3. **Selection**: Records matching on several signals, or on a strong
//!    company name, or on the only 9-digit zip, compete for the top score
//! 4. **Short-circuit**: The first address that yields candidates wins
//!
//! ## Example
//!
//! ```rust
//! use vendor_matcher::core::address::{InputAddress, PhaseData};
//! use vendor_matcher::core::vendor::VendorRecord;
//! use vendor_matcher::matching::engine::MatchingEngine;
//!
//! let vendors = vec![VendorRecord::new("V100")
//!     .with_organization_name("ACME WIDGETS INC")
//!     .with_street("PO BOX 1234")
//!     .with_zip_code("75201-1234")];
//!
//! let phase = PhaseData {
//!     vendor_company_name: Some("Acme Widgets".to_string()),
//!     remit_to_address: Some(
//!         InputAddress::new()
//!             .with_company_name("Acme Widgets")
//!             .with_address1("P.O. Box 1234")
//!             .with_zip_code("75201-1234"),
//!     ),
//!     other_supplier_addresses: None,
//! };
//!
//! let engine = MatchingEngine::new(&vendors);
//! let result = engine.find_matches(&phase).unwrap();
//! assert_eq!(result.candidates[0].record.account_number, "V100");
//! ```
//!
//! [`MatchingEngine`]: engine::MatchingEngine
//! [`AddressScore`]: scoring::AddressScore
//! [`select_top_candidates`]: selection::select_top_candidates

pub mod company;
pub mod engine;
pub mod normalize;
pub mod scoring;
pub mod selection;
