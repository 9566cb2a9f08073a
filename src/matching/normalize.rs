//! String normalization shared by the scoring rules.

/// Legal-entity suffixes and filler words ignored when comparing company names
pub const COMPANY_NAME_STOPWORDS: &[&str] = &[
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "lp",
    "limited",
    "partnership",
    "pc",
    "professional",
    "llc",
    "services",
    "dba",
];

/// Whether a lower-cased token is a company-name stopword
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    COMPANY_NAME_STOPWORDS.contains(&token)
}

/// Remove every occurrence of the given characters
#[must_use]
pub fn strip_chars(s: &str, chars: &[char]) -> String {
    s.chars().filter(|c| !chars.contains(c)).collect()
}

/// Number of `'0'` characters at the start of the string
#[must_use]
pub fn count_leading_zeros(s: &str) -> usize {
    s.chars().take_while(|&c| c == '0').count()
}

/// Align leading zeros of `candidate_zip` with `reference_zip`.
///
/// Zip codes stored as numbers lose their leading zeros ("02110" becomes
/// "2110"). When the reference has more leading zeros than the candidate,
/// the candidate is left-padded with the difference.
///
/// # Examples
///
/// ```
/// use vendor_matcher::matching::normalize::normalize_zip;
///
/// assert_eq!(normalize_zip("2110", "02110"), "02110");
/// assert_eq!(normalize_zip("02110", "2110"), "02110");
/// assert_eq!(normalize_zip("75201", "75201-1234"), "75201");
/// ```
#[must_use]
pub fn normalize_zip(candidate_zip: &str, reference_zip: &str) -> String {
    let missing = count_leading_zeros(reference_zip).saturating_sub(count_leading_zeros(candidate_zip));
    if missing == 0 {
        candidate_zip.to_string()
    } else {
        format!("{}{candidate_zip}", "0".repeat(missing))
    }
}

/// Lower-case an address line and drop periods and spaces.
///
/// `"P.O. Box 123"` and `"PO BOX 123"` both become `"pobox123"`.
#[must_use]
pub fn compact_address_line(line: &str) -> String {
    strip_chars(line, &['.', ' ']).to_lowercase()
}

/// Whether an address line denotes a post office box
#[must_use]
pub fn is_po_box(line: &str) -> bool {
    compact_address_line(line).contains("pobox")
}

/// Split a company name into comparison tokens.
///
/// Lower-cases, removes commas, periods and apostrophes, then splits on single
/// spaces. Runs of spaces produce empty tokens; callers filter by length.
#[must_use]
pub fn tokenize_company_name(name: &str) -> Vec<String> {
    strip_chars(&name.to_lowercase(), &[',', '.', '\''])
        .split(' ')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_leading_zeros() {
        assert_eq!(count_leading_zeros("00501"), 2);
        assert_eq!(count_leading_zeros("501"), 0);
        assert_eq!(count_leading_zeros(""), 0);
        assert_eq!(count_leading_zeros("000"), 3);
    }

    #[test]
    fn test_normalize_zip() {
        assert_eq!(normalize_zip("501", "00501"), "00501");
        assert_eq!(normalize_zip("501-1234", "00501-1234"), "00501-1234");
        assert_eq!(normalize_zip("0501", "00501"), "00501");
        assert_eq!(normalize_zip("12345", "12345"), "12345");
    }

    #[test]
    fn test_is_po_box() {
        assert!(is_po_box("PO BOX 123"));
        assert!(is_po_box("P.O. Box 4456, Dept 12"));
        assert!(is_po_box("p o box 9"));
        assert!(!is_po_box("123 Post Office Road"));
        assert!(!is_po_box(""));
    }

    #[test]
    fn test_tokenize_company_name() {
        assert_eq!(
            tokenize_company_name("O'Brien, Smith & Co."),
            vec!["obrien", "smith", "&", "co"]
        );
        assert_eq!(tokenize_company_name("A  B"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_stopwords() {
        assert!(is_stopword("inc"));
        assert!(is_stopword("services"));
        assert!(!is_stopword("acme"));
        assert!(!is_stopword("Inc"));
    }
}
