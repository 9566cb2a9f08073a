//! Candidate selection: turn every scored vendor record for one address into
//! a short ranked list, or nothing.

use serde::Serialize;

use crate::core::vendor::VendorRecord;
use crate::matching::scoring::AddressScore;

/// Maximum number of candidates returned for one address
pub const MAX_RESULTS: usize = 6;

/// A score (or company score) at or above this is considered a strong match
pub const STRONG_MATCH_SCORE: f64 = 99.0;

/// A vendor record with its score against one input address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub record: VendorRecord,

    pub score: f64,

    pub no_of_matches: u8,

    pub company_match_score: f64,

    pub zip_nine_match: bool,

    pub zip_score: f64,

    pub street_score: f64,
}

impl ScoredCandidate {
    pub fn new(record: VendorRecord, score: &AddressScore) -> Self {
        Self {
            record,
            score: score.score,
            no_of_matches: score.no_of_matches,
            company_match_score: score.company_match_score,
            zip_nine_match: score.zip_nine_match,
            zip_score: score.zip_score,
            street_score: score.street_score,
        }
    }
}

/// Pick the best candidates for one address.
///
/// 1. A candidate qualifies if it matched in more than one category, has a
///    strong company score, or is the *only* candidate with a 9-digit zip match.
/// 2. Qualifiers must score above `min_score`.
/// 3. Survivors tied with the top score, or scoring at least
///    [`STRONG_MATCH_SCORE`], are kept in descending score order.
/// 4. A lone survivor is returned only if it is also a strong match; otherwise
///    up to `limit` survivors are returned.
///
/// The order of these steps matters for near-tied inputs and must not be
/// rearranged.
#[must_use]
#[allow(clippy::float_cmp)] // Scores are compared exactly as computed
pub fn select_top_candidates(
    candidates: Vec<ScoredCandidate>,
    min_score: f64,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let single_zip_nine_match = candidates.iter().filter(|c| c.zip_nine_match).count() == 1;

    let mut ranked: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|c| {
            c.no_of_matches > 1
                || c.company_match_score >= STRONG_MATCH_SCORE
                || (single_zip_nine_match && c.zip_nine_match)
        })
        .filter(|c| c.score > min_score)
        .collect();

    // Stable: equal scores keep vendor list order
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_score = ranked.first().map_or(0.0, |c| c.score);

    let mut kept: Vec<ScoredCandidate> = ranked
        .into_iter()
        .filter(|c| c.score == top_score || c.score >= STRONG_MATCH_SCORE)
        .collect();

    if kept.len() == 1 {
        kept.retain(|c| c.score == top_score && c.score >= STRONG_MATCH_SCORE);
        return kept;
    }

    kept.truncate(limit);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, score: f64, no_of_matches: u8) -> ScoredCandidate {
        ScoredCandidate {
            record: VendorRecord::new(id),
            score,
            no_of_matches,
            company_match_score: 0.0,
            zip_nine_match: false,
            zip_score: 0.0,
            street_score: 0.0,
        }
    }

    fn ids(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates
            .iter()
            .map(|c| c.record.account_number.as_str())
            .collect()
    }

    #[test]
    fn test_tied_candidates_returned_together() {
        let candidates = vec![candidate("A", 80.0, 2), candidate("B", 80.0, 2)];
        let selected = select_top_candidates(candidates, 38.0, MAX_RESULTS);
        assert_eq!(ids(&selected), vec!["A", "B"]);
    }

    #[test]
    fn test_tied_candidates_capped() {
        let candidates: Vec<_> = (0..9)
            .map(|i| candidate(&format!("V{i}"), 80.0, 2))
            .collect();
        let selected = select_top_candidates(candidates, 38.0, MAX_RESULTS);
        assert_eq!(selected.len(), MAX_RESULTS);
        assert_eq!(selected[0].record.account_number, "V0");
    }

    #[test]
    fn test_lone_weak_winner_rejected() {
        let candidates = vec![candidate("A", 80.0, 2), candidate("B", 60.0, 2)];
        assert!(select_top_candidates(candidates, 38.0, MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_lone_strong_winner_returned() {
        let candidates = vec![candidate("A", 150.0, 3), candidate("B", 60.0, 2)];
        let selected = select_top_candidates(candidates, 38.0, MAX_RESULTS);
        assert_eq!(ids(&selected), vec!["A"]);
    }

    #[test]
    fn test_strong_scores_kept_below_top() {
        let candidates = vec![
            candidate("A", 120.0, 2),
            candidate("B", 200.0, 3),
            candidate("C", 99.0, 2),
            candidate("D", 98.0, 2),
        ];
        let selected = select_top_candidates(candidates, 38.0, MAX_RESULTS);
        assert_eq!(ids(&selected), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_single_signal_excluded() {
        let candidates = vec![candidate("A", 100.0, 1)];
        assert!(select_top_candidates(candidates, 38.0, MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_strong_company_match_qualifies() {
        let mut strong = candidate("A", 110.0, 1);
        strong.company_match_score = 110.0;
        let selected = select_top_candidates(vec![strong], 38.0, MAX_RESULTS);
        assert_eq!(ids(&selected), vec!["A"]);
    }

    #[test]
    fn test_single_zip_nine_carve_out() {
        let mut zip_nine = candidate("Z", 100.0, 1);
        zip_nine.zip_nine_match = true;

        let candidates = vec![
            candidate("A", 30.0, 2),
            candidate("B", 20.0, 2),
            candidate("C", 15.0, 2),
            candidate("D", 10.0, 2),
            zip_nine,
            candidate("X", 100.0, 1),
        ];
        let selected = select_top_candidates(candidates, 38.0, MAX_RESULTS);
        assert_eq!(ids(&selected), vec!["Z"]);
    }

    #[test]
    fn test_two_zip_nine_matches_no_carve_out() {
        let mut first = candidate("A", 100.0, 1);
        first.zip_nine_match = true;
        let mut second = candidate("B", 100.0, 1);
        second.zip_nine_match = true;

        assert!(select_top_candidates(vec![first, second], 38.0, MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_min_score_is_exclusive() {
        let candidates = vec![candidate("A", 38.0, 2), candidate("B", 38.0, 2)];
        assert!(select_top_candidates(candidates, 38.0, MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_top_candidates(Vec::new(), 38.0, MAX_RESULTS).is_empty());
    }
}
