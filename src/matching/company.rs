//! Token-based company name scoring.

use crate::matching::normalize::{is_stopword, tokenize_company_name};

/// Tokens shorter than this never take part in a comparison
const MIN_TOKEN_CHARS: usize = 2;

/// Points shared out across a full set of vendor tokens
const FULL_NAME_POINTS: f64 = 100.0;

/// Safely convert usize to f64 for per-token point values
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Tokenize, then drop stopwords and tokens that are too short to be meaningful
fn significant_tokens(text: Option<&str>) -> Vec<String> {
    text.map(tokenize_company_name)
        .unwrap_or_default()
        .into_iter()
        .filter(|t| !is_stopword(t) && t.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

/// Value of one matching token: 100 split evenly across the token set,
/// rounded. `None` for an empty set, whose scoring term is skipped.
fn points_per_token(tokens: &[String]) -> Option<f64> {
    if tokens.is_empty() {
        None
    } else {
        Some((FULL_NAME_POINTS / count_to_f64(tokens.len())).round())
    }
}

/// Score how well `name` matches a vendor's organization name and description.
///
/// Each significant token of `name` found among the vendor name tokens earns
/// the name-token value; otherwise, if found among the description tokens, it
/// earns the description-token value. The result is not capped.
///
/// # Examples
///
/// ```
/// use vendor_matcher::matching::company::company_name_score;
///
/// assert_eq!(company_name_score("Acme Widgets", Some("ACME WIDGETS INC"), None), 100.0);
/// assert_eq!(company_name_score("Acme", Some("ACME WIDGETS"), None), 50.0);
/// assert_eq!(company_name_score("Globex", Some("ACME"), None), 0.0);
/// ```
#[must_use]
pub fn company_name_score(
    name: &str,
    vendor_name: Option<&str>,
    vendor_description: Option<&str>,
) -> f64 {
    let name_tokens = significant_tokens(vendor_name);
    let description_tokens = significant_tokens(vendor_description);

    let name_points = points_per_token(&name_tokens);
    let description_points = points_per_token(&description_tokens);

    significant_tokens(Some(name))
        .iter()
        .map(|token| {
            if name_tokens.contains(token) {
                name_points.unwrap_or(0.0)
            } else if description_tokens.contains(token) {
                description_points.unwrap_or(0.0)
            } else {
                0.0
            }
        })
        .sum()
}
