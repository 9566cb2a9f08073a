//! Composite scoring of one input address against one vendor record.
//!
//! Three independent signal categories contribute points:
//!
//! | Category         | Points                                             |
//! |------------------|----------------------------------------------------|
//! | Zip code         | 100 (9+ digit match), 75 (full match), 50 (prefix) |
//! | Street / PO box  | `len * 2` per shared word, or shares of 40         |
//! | Company name     | Up to ~100 per name, +10 for the invoice vendor    |
//!
//! The composite score is the plain sum; `no_of_matches` counts the categories
//! that contributed anything.

use tracing::debug;

use crate::core::address::InputAddress;
use crate::core::vendor::VendorRecord;
use crate::matching::company::company_name_score;
use crate::matching::normalize::{compact_address_line, is_po_box, normalize_zip, strip_chars};

/// Zip score when a 9+ digit (ZIP+4) reference zip matches in full
pub const ZIP_NINE_POINTS: f64 = 100.0;
/// Zip score when a shorter reference zip matches in full
pub const ZIP_FULL_POINTS: f64 = 75.0;
/// Zip score when only the part before the hyphen matches
pub const ZIP_PARTIAL_POINTS: f64 = 50.0;
/// Zip score when the vendor's street line contains the full reference zip
pub const ZIP_IN_STREET_POINTS: f64 = 100.0;
/// Points shared across the vendor's PO box entries
pub const PO_BOX_POINTS: f64 = 40.0;
/// Bonus when the invoice-level vendor name wins the company comparison
pub const VENDOR_NAME_BONUS: f64 = 10.0;

/// Street words must be longer than this to count
const MIN_STREET_TOKEN_CHARS: usize = 2;

/// Minimum digits (hyphens removed) for a zip to count as ZIP+4
const ZIP_NINE_DIGITS: usize = 9;

/// Safely convert usize to f64 for point calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Score of one (input address, vendor record) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressScore {
    /// Sum of the three category scores
    pub score: f64,

    /// Number of categories (0-3) that contributed a positive score
    pub no_of_matches: u8,

    /// Zip category contribution
    pub zip_score: f64,

    /// Street / PO box category contribution
    pub street_score: f64,

    /// Company name category contribution, including any vendor-name bonus
    pub company_match_score: f64,

    /// The zip matched in full against a 9+ digit reference zip
    pub zip_nine_match: bool,
}

/// Outcome of the zip comparison
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZipMatch {
    points: f64,
    nine_digit: bool,
}

impl ZipMatch {
    const NONE: Self = Self {
        points: 0.0,
        nine_digit: false,
    };

    fn points(points: f64) -> Self {
        Self {
            points,
            nine_digit: false,
        }
    }
}

/// Score `address` against `vendor`.
///
/// `vendor_company_name` is the vendor name extracted from the invoice as a
/// whole; it competes with the address's own company name. With `trace` set,
/// each category's contribution is emitted as a `debug` event.
#[must_use]
pub fn score_address(
    address: &InputAddress,
    vendor_company_name: Option<&str>,
    vendor: &VendorRecord,
    trace: bool,
) -> AddressScore {
    let zip = score_zip(address, vendor);
    let street = score_street(address, vendor);
    let company = score_company(address, vendor_company_name, vendor);

    let no_of_matches: u8 = [zip.points, street, company]
        .iter()
        .map(|&points| u8::from(points > 0.0))
        .sum();

    let result = AddressScore {
        score: zip.points + street + company,
        no_of_matches,
        zip_score: zip.points,
        street_score: street,
        company_match_score: company,
        zip_nine_match: zip.nine_digit,
    };

    if trace {
        debug!(
            account = %vendor.account_number,
            vendor = vendor.organization_name.as_deref().unwrap_or(""),
            zip = result.zip_score,
            zip_nine = result.zip_nine_match,
            street = result.street_score,
            company = result.company_match_score,
            total = result.score,
            matches = result.no_of_matches,
            "scored vendor record"
        );
    }

    result
}

/// Zip category: compare the reference zip to the vendor zip, or to the
/// vendor's street line when the record carries no zip.
fn score_zip(address: &InputAddress, vendor: &VendorRecord) -> ZipMatch {
    let Some(reference) = address.zip_code.as_deref() else {
        return ZipMatch::NONE;
    };
    let reference_lc = reference.to_lowercase();
    let reference_digits = strip_chars(&reference_lc, &['-']);
    let prefix = reference_lc.split('-').next().unwrap_or_default();

    if let Some(vendor_zip) = vendor.zip_code.as_deref() {
        let vendor_lc = vendor_zip.to_lowercase();
        let aligned = normalize_zip(&vendor_lc, &reference_lc);
        let nine_digit = reference_digits.chars().count() >= ZIP_NINE_DIGITS;

        // Hyphens only bridge a full ZIP+4; a 5-digit zip must not match across one
        if aligned.contains(&reference_lc)
            || (nine_digit && strip_chars(&aligned, &['-']).contains(&reference_digits))
        {
            return if nine_digit {
                ZipMatch {
                    points: ZIP_NINE_POINTS,
                    nine_digit: true,
                }
            } else {
                ZipMatch::points(ZIP_FULL_POINTS)
            };
        }
        if vendor_lc.contains(prefix) {
            return ZipMatch::points(ZIP_PARTIAL_POINTS);
        }
        return ZipMatch::NONE;
    }

    if let Some(street) = vendor.street.as_deref() {
        let street_lc = street.to_lowercase();
        if street_lc.contains(&reference_lc) {
            return ZipMatch::points(ZIP_IN_STREET_POINTS);
        }
        if reference_lc.find('-').is_some_and(|i| i > 0) && street_lc.contains(prefix) {
            return ZipMatch::points(ZIP_PARTIAL_POINTS);
        }
    }

    ZipMatch::NONE
}

/// Street category: proportional PO box matching when both lines are PO
/// boxes, otherwise shared-word matching.
fn score_street(address: &InputAddress, vendor: &VendorRecord) -> f64 {
    let (Some(reference), Some(street)) = (address.address1.as_deref(), vendor.street.as_deref())
    else {
        return 0.0;
    };

    if is_po_box(reference) && is_po_box(street) {
        score_po_box(reference, street)
    } else {
        score_street_words(reference, street)
    }
}

/// A vendor street may list several PO boxes separated by commas or newlines.
/// Each listed box is worth an equal share of [`PO_BOX_POINTS`]; every
/// reference entry found in the vendor line earns one share.
fn score_po_box(reference: &str, street: &str) -> f64 {
    let vendor_line = compact_address_line(street);
    let vendor_entries = vendor_line
        .split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .count();
    if vendor_entries == 0 {
        return 0.0;
    }
    let share = PO_BOX_POINTS / count_to_f64(vendor_entries);

    let reference_line = compact_address_line(reference);
    let found = reference_line
        .split(',')
        .filter(|entry| !entry.is_empty() && vendor_line.contains(*entry))
        .count();

    share * count_to_f64(found)
}

/// Every reference word longer than two characters that also appears as a
/// vendor word earns twice its length.
fn score_street_words(reference: &str, street: &str) -> f64 {
    let reference_lc = reference.to_lowercase();
    let street_lc = street.to_lowercase();
    let vendor_words: Vec<&str> = street_lc.split(' ').collect();

    reference_lc
        .split(' ')
        .filter(|word| word.chars().count() > MIN_STREET_TOKEN_CHARS)
        .filter(|word| vendor_words.contains(&strip_chars(word, &[',']).as_str()))
        .map(|word| count_to_f64(word.chars().count()) * 2.0)
        .sum()
}

/// Company category: the better of the invoice vendor name and the address's
/// own company name. Ties go to the invoice vendor name, which also earns
/// [`VENDOR_NAME_BONUS`].
fn score_company(
    address: &InputAddress,
    vendor_company_name: Option<&str>,
    vendor: &VendorRecord,
) -> f64 {
    let (Some(company_name), Some(organization)) = (
        address.company_name.as_deref(),
        vendor.organization_name.as_deref(),
    ) else {
        return 0.0;
    };
    let description = vendor.description.as_deref();

    let vendor_name_score = vendor_company_name
        .map_or(0.0, |name| company_name_score(name, Some(organization), description));
    let address_name_score = company_name_score(company_name, Some(organization), description);

    if vendor_name_score > 0.0 && vendor_name_score >= address_name_score {
        vendor_name_score + VENDOR_NAME_BONUS
    } else {
        address_name_score
    }
}
