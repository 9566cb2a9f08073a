//! Score command - show how one invoice address scores against every vendor.
//!
//! Unlike `match`, no candidate selection is applied: every record of the
//! requested country is listed with its per-category breakdown. Useful for
//! explaining why an expected vendor did not come back.

use std::path::PathBuf;

use clap::Args;

use crate::cli::identify::print_tsv_results;
use crate::cli::{OutputFormat, VendorSourceArgs};
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::matching::selection::{ScoredCandidate, STRONG_MATCH_SCORE};
use crate::parsing::phase::parse_phase_file;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Extracted invoice header fields (JSON)
    #[arg(required = true)]
    pub phase1: PathBuf,

    #[command(flatten)]
    pub source: VendorSourceArgs,

    /// Which invoice address to score (0 = remit-to, then other supplier addresses)
    #[arg(long, default_value = "0")]
    pub address: usize,

    /// Number of records to show
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,
}

/// Execute score subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be parsed, the address index is out
/// of range, or a vendor record is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let phase = parse_phase_file(&args.phase1)?;
    let addresses = phase.addresses();
    let address = addresses.get(args.address).ok_or_else(|| {
        anyhow::anyhow!(
            "Address index {} out of range: invoice has {} address(es)",
            args.address,
            addresses.len()
        )
    })?;

    let vendors = args.source.load()?;

    let config = MatchingConfig {
        min_score: args.source.min_score,
        is_canadian: args.source.canadian,
        trace_scoring: verbose,
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::with_config(&vendors, config);
    let mut scored = engine.score_all(address, phase.vendor_company_name.as_deref())?;
    let total = scored.len();
    scored.truncate(args.top);

    match format {
        OutputFormat::Text => print_text_result(&scored, total, args.source.min_score),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "addressIndex": args.address,
                "scored": total,
                "candidates": scored,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv_results(&scored),
    }

    Ok(())
}

fn print_text_result(scored: &[ScoredCandidate], total: usize, min_score: f64) {
    println!("Scored {total} vendor records (showing {})", scored.len());
    println!(
        "\n{:>4}  {:<14} {:>6} {:>5} {:>6} {:>7} {:>4}  Organization",
        "Rank", "Account", "Score", "Zip", "Street", "Company", "Hits"
    );
    for (i, c) in scored.iter().enumerate() {
        let marker = if c.score >= STRONG_MATCH_SCORE {
            "*"
        } else if c.score > min_score {
            "+"
        } else {
            " "
        };
        println!(
            "{:>3}{marker}  {:<14} {:>6.0} {:>5.0} {:>6.0} {:>7.0} {:>4}  {}",
            i + 1,
            c.record.account_number,
            c.score,
            c.zip_score,
            c.street_score,
            c.company_match_score,
            c.no_of_matches,
            c.record.organization_name.as_deref().unwrap_or(""),
        );
    }
    println!("\n* strong match   + above minimum score");
}
