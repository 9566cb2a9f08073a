//! # vendor-matcher
//!
//! A library for matching invoice addresses against a vendor master list.
//!
//! Accounts-payable pipelines extract the remit-to and other supplier
//! addresses from an invoice, but the same vendor appears in the master list
//! under many spellings, several PO boxes and zip+4 variants. `vendor-matcher`
//! scores every vendor record against each extracted address and returns the
//! few records the invoice most plausibly belongs to, or nothing at all when
//! no record is convincing.
//!
//! ## Features
//!
//! - **Zip matching**: 9-digit, 5-digit and partial zip codes, tolerant of
//!   hyphens and dropped leading zeros
//! - **PO box matching**: Compares box numbers across differently written PO
//!   box lines, including records that list several boxes
//! - **Company name matching**: Token overlap with corporate stopwords ignored
//! - **Conservative selection**: Weak lone winners are rejected rather than guessed
//! - **Country buckets**: Canadian (`VCA`) and other vendors are matched separately
//!
//! ## Example
//!
//! ```rust,no_run
//! use vendor_matcher::{MatchingEngine, PhaseData};
//! use vendor_matcher::parsing::vendors::parse_vendor_csv_file;
//! use std::path::Path;
//!
//! let vendors = parse_vendor_csv_file(Path::new("vendors.csv")).unwrap();
//! let phase: PhaseData = serde_json::from_str(r#"{
//!     "vendorCompanyName": "Acme Widgets",
//!     "remitToAddress": {"address1": "PO Box 1234", "zipCode": "75201-1234"}
//! }"#).unwrap();
//!
//! let engine = MatchingEngine::new(&vendors);
//! let result = engine.find_matches(&phase).unwrap();
//!
//! for c in &result.candidates {
//!     println!("{}: {:.0}", c.record.account_number, c.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Invoice address and vendor record types
//! - [`matching`]: Normalization, scoring, selection and the matching engine
//! - [`parsing`]: Vendor CSV / JSON and invoice JSON loaders
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP service for the invoice pipeline

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::address::{InputAddress, PhaseData};
pub use core::vendor::VendorRecord;
pub use matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
pub use matching::selection::ScoredCandidate;
