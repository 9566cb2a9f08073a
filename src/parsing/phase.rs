use std::path::Path;
use thiserror::Error;

use crate::core::address::PhaseData;

#[derive(Error, Debug)]
pub enum PhaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid invoice data JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read extracted invoice header fields from a JSON file
///
/// # Errors
///
/// Returns `PhaseError::Io` if the file cannot be read or `PhaseError::Json`
/// if it is not a JSON object of the expected shape.
pub fn parse_phase_file(path: &Path) -> Result<PhaseData, PhaseError> {
    let content = std::fs::read_to_string(path)?;
    parse_phase_text(&content)
}

/// Parse extracted invoice header fields from JSON text
///
/// # Errors
///
/// Returns `PhaseError::Json` if the text is not a JSON object of the
/// expected shape.
pub fn parse_phase_text(text: &str) -> Result<PhaseData, PhaseError> {
    Ok(serde_json::from_str(text)?)
}
