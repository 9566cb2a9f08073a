use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, VendorSourceArgs};
use crate::matching::engine::{MatchResult, MatchingConfig, MatchingEngine};
use crate::matching::selection::ScoredCandidate;
use crate::parsing::phase::parse_phase_file;

#[derive(Args)]
pub struct MatchArgs {
    /// Extracted invoice header fields (JSON)
    #[arg(required = true)]
    pub phase1: PathBuf,

    #[command(flatten)]
    pub source: VendorSourceArgs,

    /// Log every category score for every (address, vendor) pair
    #[arg(long)]
    pub trace_scoring: bool,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be parsed or a vendor record is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let phase = parse_phase_file(&args.phase1)?;
    let vendors = args.source.load()?;

    if verbose {
        eprintln!(
            "Loaded {} vendor records; invoice has {} address(es)",
            vendors.len(),
            phase.addresses().len()
        );
    }

    if vendors.is_empty() {
        eprintln!("Warning: Vendor list is empty, nothing to match against.");
    }

    let config = MatchingConfig {
        min_score: args.source.min_score,
        is_canadian: args.source.canadian,
        trace_scoring: args.trace_scoring,
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::with_config(&vendors, config);
    let result = engine.find_matches(&phase)?;

    match format {
        OutputFormat::Text => print_text_results(&result, verbose),
        OutputFormat::Json => print_json_results(&result)?,
        OutputFormat::Tsv => print_tsv_results(&result.candidates),
    }

    Ok(())
}

fn print_text_results(result: &MatchResult, verbose: bool) {
    let Some(index) = result.address_index else {
        println!("No matching vendors found.");
        return;
    };

    let source = if index == 0 {
        "remit-to address".to_string()
    } else {
        format!("supplier address #{index}")
    };
    println!("Matched on {source}");

    for (i, candidate) in result.candidates.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        let record = &candidate.record;
        println!(
            "\n#{} {} ({})",
            i + 1,
            record.organization_name.as_deref().unwrap_or("<unnamed>"),
            record.account_number
        );
        if let Some(street) = &record.street {
            println!("   Street: {street}");
        }
        if let Some(zip) = &record.zip_code {
            println!("   Zip: {zip}");
        }
        println!(
            "\n   Score: {:.0} = {:.0} zip + {:.0} street + {:.0} company",
            candidate.score,
            candidate.zip_score,
            candidate.street_score,
            candidate.company_match_score
        );
        println!("   Categories matched: {}", candidate.no_of_matches);
        if candidate.zip_nine_match {
            println!("   9-digit zip match");
        }

        if verbose && !record.extra.is_empty() {
            println!("\n   Other columns:");
            for (name, value) in &record.extra {
                println!("     {name}: {value}");
            }
        }
    }

    println!();
}

fn print_json_results(result: &MatchResult) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "topMatches": result.candidates,
        "addressIndex": result.address_index,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Tab-separated candidate rows, shared with the score command
pub(crate) fn print_tsv_results(candidates: &[ScoredCandidate]) {
    println!("rank\taccount_number\torganization_name\tstreet\tzip_code\tscore\tzip_score\tstreet_score\tcompany_score\tno_of_matches\tzip_nine_match");
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.0}\t{:.0}\t{:.0}\t{:.0}\t{}\t{}",
            i + 1,
            c.record.account_number,
            c.record.organization_name.as_deref().unwrap_or(""),
            c.record.street.as_deref().unwrap_or(""),
            c.record.zip_code.as_deref().unwrap_or(""),
            c.score,
            c.zip_score,
            c.street_score,
            c.company_match_score,
            c.no_of_matches,
            c.zip_nine_match,
        );
    }
}
