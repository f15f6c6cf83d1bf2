use log::{debug, warn};

use crate::error::{Error, Result};
use crate::types::Match;
use super::types::FinderParams;

/// Checks a finder's output against its contract and the configured match
/// count bound.
///
/// Contract breaches (indices out of range, inverted spans, sub-minimum
/// lengths, overlapping ranges) are programming errors in the finder and
/// fail fast as `MatchContract`; they are never clamped or repaired. A
/// match count above `max_matches` is a user-correctable condition and
/// surfaces as `TooManyMatches` with the true count, never a truncated set.
pub fn validate_matches(
    matches: &[Match],
    len_a: usize,
    len_b: usize,
    params: &FinderParams,
    max_matches: usize,
) -> Result<()> {
    for m in matches {
        if m.start_a > m.end_a || m.end_a > len_a {
            return Err(Error::contract(format!(
                "A-range {}..{} out of bounds for text of length {}",
                m.start_a, m.end_a, len_a
            )));
        }
        if m.start_b > m.end_b || m.end_b > len_b {
            return Err(Error::contract(format!(
                "B-range {}..{} out of bounds for text of length {}",
                m.start_b, m.end_b, len_b
            )));
        }
        if m.length != m.len_a() {
            return Err(Error::contract(format!(
                "declared length {} disagrees with A-range {}..{}",
                m.length, m.start_a, m.end_a
            )));
        }
        if m.min_len() < params.min_len {
            return Err(Error::contract(format!(
                "match {}..{}/{}..{} is shorter than the requested minimum {}",
                m.start_a, m.end_a, m.start_b, m.end_b, params.min_len
            )));
        }
        if !m.ratio.is_finite() || m.ratio <= 0.0 || m.ratio > 1.0 {
            return Err(Error::contract(format!("ratio {} outside (0, 1]", m.ratio)));
        }
    }

    // Count bound before the quadratic overlap scan: degenerate input is
    // exactly the case where that scan would be expensive.
    if matches.len() > max_matches {
        warn!(
            "Match count {} exceeds configured limit {}",
            matches.len(),
            max_matches
        );
        return Err(Error::TooManyMatches {
            count: matches.len(),
            limit: max_matches,
        });
    }

    for (i, m1) in matches.iter().enumerate() {
        for m2 in matches.iter().skip(i + 1) {
            if m1.overlaps_a(m2) || m1.overlaps_b(m2) {
                return Err(Error::contract(format!(
                    "matches {}..{}/{}..{} and {}..{}/{}..{} overlap",
                    m1.start_a, m1.end_a, m1.start_b, m1.end_b,
                    m2.start_a, m2.end_a, m2.start_b, m2.end_b
                )));
            }
        }
    }

    debug!("Validated {} matches against limit {}", matches.len(), max_matches);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FinderParams {
        FinderParams { min_len: 3, ratio: 0.7, max_strikes: 0 }
    }

    #[test]
    fn accepts_well_formed_set() {
        let matches = vec![
            Match::new(0, 4, 0, 4, 1.0),
            Match::new(5, 8, 4, 7, 1.0),
        ];
        assert!(validate_matches(&matches, 8, 7, &params(), 100).is_ok());
    }

    #[test]
    fn count_above_limit_reports_true_count() {
        let matches: Vec<Match> = (0..7)
            .map(|i| Match::new(i * 4, i * 4 + 3, i * 4, i * 4 + 3, 1.0))
            .collect();
        let err = validate_matches(&matches, 100, 100, &params(), 5).unwrap_err();
        match err {
            Error::TooManyMatches { count, limit } => {
                assert_eq!(count, 7);
                assert_eq!(limit, 5);
            }
            other => panic!("expected TooManyMatches, got {other:?}"),
        }
    }

    #[test]
    fn out_of_bounds_is_a_contract_violation() {
        let matches = vec![Match::new(0, 9, 0, 4, 1.0)];
        let err = validate_matches(&matches, 8, 7, &params(), 100).unwrap_err();
        assert!(matches!(err, Error::MatchContract(_)));
    }

    #[test]
    fn inverted_range_is_a_contract_violation() {
        let m = Match { start_a: 5, end_a: 2, start_b: 0, end_b: 3, length: 0, ratio: 1.0 };
        let err = validate_matches(&[m], 8, 7, &params(), 100).unwrap_err();
        assert!(matches!(err, Error::MatchContract(_)));
    }

    #[test]
    fn overlap_is_a_contract_violation() {
        let matches = vec![
            Match::new(0, 4, 0, 4, 1.0),
            Match::new(2, 6, 4, 7, 1.0),
        ];
        let err = validate_matches(&matches, 8, 8, &params(), 100).unwrap_err();
        assert!(matches!(err, Error::MatchContract(_)));
    }

    #[test]
    fn short_match_is_a_contract_violation() {
        let matches = vec![Match::new(0, 2, 0, 2, 1.0)];
        let err = validate_matches(&matches, 8, 7, &params(), 100).unwrap_err();
        assert!(matches!(err, Error::MatchContract(_)));
    }
}
