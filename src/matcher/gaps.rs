use crate::types::Match;

/// The text between two matches in both documents, awaiting a similarity
/// score. Spans borrow the request's char buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapPair<'a> {
    pub a_range: (usize, usize),
    pub b_range: (usize, usize),
    pub span_a: &'a [char],
    pub span_b: &'a [char],
}

/// Enumerates the full cross product of a validated match set and keeps
/// every ordered pair with strict precedence in both documents — not just
/// adjacent pairs, so distant but order-consistent regions are compared
/// too. Quadratic in match count, which the validator's cap bounds.
///
/// Pairs come out in the match set's own iteration order; under strict
/// precedence the derived spans are always non-empty.
pub fn gap_pairs<'a>(
    matches: &[Match],
    a: &'a [char],
    b: &'a [char],
) -> Vec<GapPair<'a>> {
    let mut pairs = Vec::new();
    for (i, prior) in matches.iter().enumerate() {
        for (j, next) in matches.iter().enumerate() {
            if i == j {
                continue;
            }
            if prior.end_a >= next.start_a || prior.end_b >= next.start_b {
                continue;
            }
            pairs.push(GapPair {
                a_range: (prior.end_a, next.start_a),
                b_range: (prior.end_b, next.start_b),
                span_a: &a[prior.end_a..next.start_a],
                span_b: &b[prior.end_b..next.start_b],
            });
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn strict_precedence_in_both_documents() {
        let a = chars("abcdXefg");
        let b = chars("abcdYefg");
        let matches = vec![
            Match::new(0, 4, 0, 4, 1.0),
            Match::new(5, 8, 5, 8, 1.0),
        ];
        let pairs = gap_pairs(&matches, &a, &b);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].a_range, (4, 5));
        assert_eq!(pairs[0].b_range, (4, 5));
        assert_eq!(pairs[0].span_a, &['X']);
        assert_eq!(pairs[0].span_b, &['Y']);
    }

    #[test]
    fn adjacency_in_one_document_excludes_the_pair() {
        // B-side gap would be empty (end == start), so no pair forms.
        let a = chars("abcdzefg");
        let b = chars("abcdefg");
        let matches = vec![
            Match::new(0, 4, 0, 4, 1.0),
            Match::new(5, 8, 4, 7, 1.0),
        ];
        assert!(gap_pairs(&matches, &a, &b).is_empty());
    }

    #[test]
    fn crossing_matches_never_pair() {
        let a = chars("hello world");
        let b = chars("world hello");
        let matches = vec![
            Match::new(0, 5, 6, 11, 1.0),
            Match::new(6, 11, 0, 5, 1.0),
        ];
        assert!(gap_pairs(&matches, &a, &b).is_empty());
    }

    #[test]
    fn non_adjacent_pairs_are_included() {
        // Three matches in consistent order: (0,1), (0,2) and (1,2) all
        // qualify.
        let a = chars("aa.bb.cc");
        let b = chars("aa,bb,cc");
        let matches = vec![
            Match::new(0, 2, 0, 2, 1.0),
            Match::new(3, 5, 3, 5, 1.0),
            Match::new(6, 8, 6, 8, 1.0),
        ];
        let pairs = gap_pairs(&matches, &a, &b);

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].a_range, (2, 3));
        assert_eq!(pairs[1].a_range, (2, 6));
        assert_eq!(pairs[1].span_a, &['.', 'b', 'b', '.']);
        assert_eq!(pairs[2].a_range, (5, 6));
    }

    #[test]
    fn single_match_yields_no_pairs() {
        let a = chars("identical text");
        let matches = vec![Match::new(0, 14, 0, 14, 1.0)];
        assert!(gap_pairs(&matches, &a, &a).is_empty());
    }
}
