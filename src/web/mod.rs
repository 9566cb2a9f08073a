//! HTTP service for invoice vendor matching.
//!
//! The invoice-processing pipeline posts extracted header fields here and gets
//! back the best vendor candidates.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 3000, vendor CSVs from ./vendors
//! vendor-matcher serve
//!
//! # Custom port and vendor directory
//! vendor-matcher serve --port 8080 --vendors-dir /data/vendors
//!
//! # Bind to all interfaces
//! vendor-matcher serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/vendor-matching` - Match `{ phase1Data, csvData?, isCanadian?, minScore? }`
//! - `GET /health` - Liveness check

pub mod server;
