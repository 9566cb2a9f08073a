//! Loaders for the two matcher inputs.
//!
//! - **Vendor master list**: CSV files (one or a whole directory) or JSON row
//!   objects, normalized into validated [`VendorRecord`]s
//! - **Invoice header data**: JSON produced by the extraction step, parsed
//!   into [`PhaseData`]
//!
//! ## Vendor Columns
//!
//! Column names are matched case-insensitively, and a byte-order mark on the
//! first header is ignored.
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | VENDORACCOUNTNUMBER | Account number; `VCA` prefix marks Canadian vendors | Yes |
//! | VENDORORGANIZATIONNAME | Organization name | No |
//! | ADDRESSSTREET | Street line(s), may list several PO boxes | No |
//! | ADDRESSZIPCODE | Zip / postal code | No |
//! | ADDRESSDESCRIPTION | Free-text description | No |
//!
//! Other columns are carried through untouched.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vendor_matcher::parsing::phase::parse_phase_file;
//! use vendor_matcher::parsing::vendors::load_vendor_dir;
//! use std::path::Path;
//!
//! let vendors = load_vendor_dir(Path::new("vendors")).unwrap();
//! let phase = parse_phase_file(Path::new("phase1.json")).unwrap();
//! ```
//!
//! [`VendorRecord`]: crate::core::vendor::VendorRecord
//! [`PhaseData`]: crate::core::address::PhaseData

pub mod phase;
pub mod vendors;
