//! Command-line interface for vendor-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Find the vendor master records that best fit an invoice
//! - **score**: Show the raw per-category scores of one invoice address
//! - **serve**: Start the HTTP matching service
//!
//! ## Usage
//!
//! ```text
//! # Match an invoice against a directory of vendor CSV exports
//! vendor-matcher match phase1.json --vendors-dir vendors/
//!
//! # Canadian vendors only, JSON output for scripting
//! vendor-matcher match phase1.json --vendors vendors.csv --canadian --format json
//!
//! # Why did (or didn't) a vendor match?
//! vendor-matcher score phase1.json --vendors vendors.csv --top 20
//!
//! # Start the HTTP service
//! vendor-matcher serve --port 3000 --vendors-dir vendors/
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::vendor::VendorRecord;
use crate::matching::engine::DEFAULT_MIN_SCORE;
use crate::parsing::vendors::{load_vendor_dir, load_vendor_files};

pub mod identify;
pub mod score;

#[derive(Parser)]
#[command(name = "vendor-matcher")]
#[command(version)]
#[command(about = "Match invoice remit-to addresses against a vendor master list")]
#[command(
    long_about = "vendor-matcher finds which vendor master records an invoice was issued by.\n\nIt scores the invoice's remit-to and other supplier addresses against every vendor record on:\n- Zip code (9-digit, 5-digit and partial matches)\n- Street line and PO box numbers\n- Company name tokens\n\nand returns the best candidates, or nothing when no record is convincing."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best vendor records for an invoice
    #[command(alias = "identify")]
    Match(identify::MatchArgs),

    /// Score one invoice address against every vendor record
    Score(score::ScoreArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Where vendor master records come from
#[derive(clap::Args)]
pub struct VendorSourceArgs {
    /// Vendor master list CSV file(s)
    #[arg(long, num_args = 1.., required_unless_present = "vendors_dir")]
    pub vendors: Vec<PathBuf>,

    /// Directory of vendor CSV files (all *.csv files are loaded)
    #[arg(long, conflicts_with = "vendors")]
    pub vendors_dir: Option<PathBuf>,

    /// Match against Canadian vendors (account numbers starting with VCA)
    #[arg(long)]
    pub canadian: bool,

    /// Candidates must score strictly above this
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: f64,
}

impl VendorSourceArgs {
    /// Load every vendor record named on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if a file or directory cannot be read or holds
    /// invalid vendor rows.
    pub fn load(&self) -> anyhow::Result<Vec<VendorRecord>> {
        let records = match &self.vendors_dir {
            Some(dir) => load_vendor_dir(dir)?,
            None => load_vendor_files(&self.vendors)?,
        };
        Ok(records)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Directory of vendor CSV files used when a request carries no rows
    #[arg(long, default_value = "vendors")]
    pub vendors_dir: PathBuf,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
