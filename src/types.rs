use serde::{Serialize, Deserialize};

/// One approximately-equal span pair between the two documents.
///
/// Indices are char (code point) offsets, end-exclusive. The two sides may
/// differ in length when the match tolerated edits; `length` is the A-side
/// length, `ratio` the finder's own similarity score for the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub start_a: usize,
    pub end_a: usize,
    pub start_b: usize,
    pub end_b: usize,
    pub length: usize,
    pub ratio: f64,
}

impl Match {
    pub fn new(start_a: usize, end_a: usize, start_b: usize, end_b: usize, ratio: f64) -> Self {
        Self {
            start_a,
            end_a,
            start_b,
            end_b,
            length: end_a - start_a,
            ratio,
        }
    }

    pub fn len_a(&self) -> usize {
        self.end_a - self.start_a
    }

    pub fn len_b(&self) -> usize {
        self.end_b - self.start_b
    }

    /// Length of the shorter side, the quantity the minimum-length
    /// requirement is checked against.
    pub fn min_len(&self) -> usize {
        self.len_a().min(self.len_b())
    }

    pub fn overlaps_a(&self, other: &Match) -> bool {
        self.start_a < other.end_a && other.start_a < self.end_a
    }

    pub fn overlaps_b(&self, other: &Match) -> bool {
        self.start_b < other.end_b && other.start_b < self.end_b
    }
}

/// One record of the final report: either a match (`match = true`, carrying
/// the finder's ratio) or a gap pair (`match = false`, carrying the cosine
/// score of the two gap spans). Ranges serialize as `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub a: (usize, usize),
    pub b: (usize, usize),
    pub similarity: f64,
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// The full comparison output, serialized as `{"pairs": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub pairs: Vec<AlignmentRecord>,
}

impl AlignmentReport {
    pub fn matches(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.pairs.iter().filter(|r| r.is_match)
    }

    pub fn gaps(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.pairs.iter().filter(|r| !r.is_match)
    }
}
