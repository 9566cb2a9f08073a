//! Core data types for vendor matching.
//!
//! - [`InputAddress`]: One address extracted from an invoice
//! - [`PhaseData`]: The invoice header fields the matcher consumes
//! - [`VendorRecord`]: One row of the vendor master list
//!
//! Both sides are read-only to the matcher. Blank strings are normalized to
//! `None` on the way in, so "absent" and "empty" mean the same thing to the
//! scoring rules.
//!
//! [`InputAddress`]: address::InputAddress
//! [`PhaseData`]: address::PhaseData
//! [`VendorRecord`]: vendor::VendorRecord

pub mod address;
pub mod vendor;
