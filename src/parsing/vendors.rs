use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::vendor::{VendorRecord, KNOWN_COLUMNS};
use crate::utils::validation::{
    check_vendor_limit, is_csv_file, normalize_column_name, MAX_VENDOR_RECORDS,
};

#[derive(Error, Debug)]
pub enum VendorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vendor CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid vendor JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vendor row {row} has no account number")]
    MissingAccountNumber { row: usize },

    #[error("Too many vendor records: {0} exceeds maximum allowed (1000000)")]
    TooManyRecords(usize),

    #[error("No CSV files found in {}", .0.display())]
    NoVendorFiles(PathBuf),
}

/// Parse a vendor master list CSV file
///
/// # Errors
///
/// Returns `VendorError::Io` if the file cannot be opened, or any error from
/// [`parse_vendor_csv_reader`].
pub fn parse_vendor_csv_file(path: &Path) -> Result<Vec<VendorRecord>, VendorError> {
    let file = std::fs::File::open(path)?;
    let records = parse_vendor_csv_reader(file)?;
    debug!("Loaded {} vendor records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse vendor master list CSV text
///
/// # Errors
///
/// See [`parse_vendor_csv_reader`].
pub fn parse_vendor_csv_text(text: &str) -> Result<Vec<VendorRecord>, VendorError> {
    parse_vendor_csv_reader(text.as_bytes())
}

/// Parse vendor CSV with a header row.
///
/// Column names are normalized (BOM removed, upper-cased) so the scoring code
/// only ever sees canonical names. Row numbers in errors are 1-based data rows.
///
/// # Errors
///
/// Returns `VendorError::Csv` on malformed CSV, `VendorError::MissingAccountNumber`
/// for a row with a blank account number, or `VendorError::TooManyRecords` if
/// the limit is exceeded.
pub fn parse_vendor_csv_reader<R: Read>(reader: R) -> Result<Vec<VendorRecord>, VendorError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_column_name)
        .collect();

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let columns: BTreeMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        push_record(&mut records, columns, i + 1)?;
    }

    Ok(records)
}

/// Convert JSON row objects (as posted to the web API) into vendor records.
///
/// Values may be strings, numbers or booleans; nulls, arrays and objects are
/// treated as absent. Only the known vendor columns are matched
/// case-insensitively; other keys are kept exactly as posted.
///
/// # Errors
///
/// Returns `VendorError::MissingAccountNumber` for a row with no account
/// number or `VendorError::TooManyRecords` if the limit is exceeded.
pub fn records_from_json_rows(
    rows: &[serde_json::Map<String, serde_json::Value>],
) -> Result<Vec<VendorRecord>, VendorError> {
    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let columns: BTreeMap<String, String> = row
            .iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((json_column_name(name), value))
            })
            .collect();

        push_record(&mut records, columns, i + 1)?;
    }
    Ok(records)
}

/// Parse a JSON array of vendor row objects
///
/// # Errors
///
/// Returns `VendorError::Json` if the text is not an array of objects, or any
/// error from [`records_from_json_rows`].
pub fn parse_vendor_json_text(text: &str) -> Result<Vec<VendorRecord>, VendorError> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(text)?;
    records_from_json_rows(&rows)
}

/// Load and concatenate every CSV file in a directory, in file-name order
///
/// # Errors
///
/// Returns `VendorError::Io` if the directory cannot be read,
/// `VendorError::NoVendorFiles` if it holds no CSV files, or any error from
/// parsing an individual file.
pub fn load_vendor_dir(dir: &Path) -> Result<Vec<VendorRecord>, VendorError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_csv_file(path))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(VendorError::NoVendorFiles(dir.to_path_buf()));
    }

    load_vendor_files(&files)
}

/// Load and concatenate several vendor CSV files
///
/// # Errors
///
/// Returns the first error encountered, or `VendorError::TooManyRecords` if
/// the combined files exceed the limit.
pub fn load_vendor_files(paths: &[PathBuf]) -> Result<Vec<VendorRecord>, VendorError> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(parse_vendor_csv_file(path)?);
        if records.len() > MAX_VENDOR_RECORDS {
            return Err(VendorError::TooManyRecords(records.len()));
        }
    }
    info!(
        "Loaded {} vendor records from {} file(s)",
        records.len(),
        paths.len()
    );
    Ok(records)
}

/// Canonical name for a known vendor column, otherwise the key as given
fn json_column_name(name: &str) -> String {
    let canonical = normalize_column_name(name);
    if KNOWN_COLUMNS.contains(&canonical.as_str()) {
        canonical
    } else {
        name.to_string()
    }
}

fn push_record(
    records: &mut Vec<VendorRecord>,
    columns: BTreeMap<String, String>,
    row: usize,
) -> Result<(), VendorError> {
    if check_vendor_limit(records.len()).is_some() {
        return Err(VendorError::TooManyRecords(records.len()));
    }
    let record =
        VendorRecord::from_columns(columns).ok_or(VendorError::MissingAccountNumber { row })?;
    records.push(record);
    Ok(())
}
