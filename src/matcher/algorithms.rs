use log::debug;

use crate::error::{Error, Result};
use crate::types::Match;
use crate::config::subsystems::matcher::FinderKind;
use super::types::{DiagonalRun, FinderParams};

/// The MatchFinder trait is the capability interface for the approximate
/// common-substring search. Implementations must report deterministic,
/// pairwise non-overlapping span pairs whose shorter side is at least
/// `min_len` and whose similarity meets the requested ratio; the pairing
/// and scoring layers rely on those guarantees.
pub trait MatchFinder: Send + Sync {
    /// A short stable name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Finds all qualifying span pairs between the two char sequences.
    fn find_matches(&self, a: &[char], b: &[char], params: &FinderParams) -> Result<Vec<Match>>;
}

/// Approximate finder: anchors on maximal equal diagonal runs, then chains
/// runs that follow each other in both documents, spending the strike
/// budget on the bridged region. Every merge is re-validated with a full
/// Levenshtein ratio over the merged spans, so a chain can never fall below
/// the requested threshold.
///
/// Overlaps are resolved longest-first, so a short pattern repeated
/// adjacently to itself coalesces into the single longest run instead of
/// being reported as separate fragments.
pub struct LevenshteinFinder;

impl LevenshteinFinder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LevenshteinFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain of diagonal runs under construction, with the strike budget
/// already spent on its bridges.
struct Chain {
    start_a: usize,
    end_a: usize,
    start_b: usize,
    end_b: usize,
    strikes_spent: usize,
    ratio: f64,
}

impl Chain {
    fn from_run(run: &DiagonalRun) -> Self {
        Self {
            start_a: run.start_a,
            end_a: run.end_a(),
            start_b: run.start_b,
            end_b: run.end_b(),
            strikes_spent: 0,
            ratio: 1.0,
        }
    }
}

impl MatchFinder for LevenshteinFinder {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn find_matches(&self, a: &[char], b: &[char], params: &FinderParams) -> Result<Vec<Match>> {
        params.validate()?;
        if a.is_empty() || b.is_empty() {
            return Err(Error::invalid_input("both texts must be non-empty"));
        }

        let mut runs = collect_diagonal_runs(a, b);
        runs.sort_by_key(|r| (r.start_a, r.start_b));
        debug!("Collected {} diagonal runs", runs.len());

        // Chain runs that follow each other in both documents. A bridge of
        // gap_a chars in A aligned against gap_b chars in B costs
        // max(gap_a, gap_b) strikes, a lower bound on the edits it adds.
        let mut consumed = vec![false; runs.len()];
        let mut candidates = Vec::new();
        for i in 0..runs.len() {
            if consumed[i] {
                continue;
            }
            let mut chain = Chain::from_run(&runs[i]);
            for j in (i + 1)..runs.len() {
                if consumed[j] {
                    continue;
                }
                let run = &runs[j];
                if run.start_a < chain.end_a || run.start_b < chain.end_b {
                    continue;
                }
                let cost = (run.start_a - chain.end_a).max(run.start_b - chain.end_b);
                if chain.strikes_spent + cost > params.max_strikes {
                    continue;
                }
                let merged_ratio = levenshtein_similarity(
                    &a[chain.start_a..run.end_a()],
                    &b[chain.start_b..run.end_b()],
                );
                if merged_ratio < params.ratio {
                    continue;
                }
                chain.end_a = run.end_a();
                chain.end_b = run.end_b();
                chain.strikes_spent += cost;
                chain.ratio = merged_ratio;
                consumed[j] = true;
            }
            candidates.push(Match::new(
                chain.start_a,
                chain.end_a,
                chain.start_b,
                chain.end_b,
                chain.ratio,
            ));
        }

        candidates.retain(|m| m.min_len() >= params.min_len && m.ratio >= params.ratio);
        Ok(resolve_overlaps(candidates))
    }
}

/// Exact-match companion: maximal equal diagonal runs only, ratio fixed at
/// 1.0, same minimum-length and non-overlap contract. The strike budget is
/// ignored.
pub struct ExactFinder;

impl ExactFinder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExactFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchFinder for ExactFinder {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn find_matches(&self, a: &[char], b: &[char], params: &FinderParams) -> Result<Vec<Match>> {
        params.validate()?;
        if a.is_empty() || b.is_empty() {
            return Err(Error::invalid_input("both texts must be non-empty"));
        }

        let candidates = collect_diagonal_runs(a, b)
            .into_iter()
            .filter(|r| r.len >= params.min_len)
            .map(|r| Match::new(r.start_a, r.end_a(), r.start_b, r.end_b(), 1.0))
            .collect();
        Ok(resolve_overlaps(candidates))
    }
}

/// Factory for creating match finder instances
pub struct MatchFinderFactory;

impl MatchFinderFactory {
    pub fn create(kind: FinderKind) -> Box<dyn MatchFinder> {
        match kind {
            FinderKind::Levenshtein => Box::new(LevenshteinFinder::new()),
            FinderKind::Exact => Box::new(ExactFinder::new()),
        }
    }
}

/// Walks every diagonal of the comparison table and collects each maximal
/// run of equal characters.
fn collect_diagonal_runs(a: &[char], b: &[char]) -> Vec<DiagonalRun> {
    let mut runs = Vec::new();
    let starts = (0..a.len()).map(|i| (i, 0)).chain((1..b.len()).map(|j| (0, j)));
    for (start_a, start_b) in starts {
        let mut run: Option<DiagonalRun> = None;
        let mut i = start_a;
        let mut j = start_b;
        while i < a.len() && j < b.len() {
            if a[i] == b[j] {
                match run.as_mut() {
                    Some(r) => r.len += 1,
                    None => run = Some(DiagonalRun { start_a: i, start_b: j, len: 1 }),
                }
            } else if let Some(r) = run.take() {
                runs.push(r);
            }
            i += 1;
            j += 1;
        }
        if let Some(r) = run {
            runs.push(r);
        }
    }
    runs
}

/// Greedily keeps the longest candidates whose index ranges do not
/// intersect any already-kept match in either document, then returns them
/// in document order. Longest-first resolution is what coalesces adjacent
/// repeats of a short pattern into one span.
fn resolve_overlaps(mut candidates: Vec<Match>) -> Vec<Match> {
    candidates.sort_by(|x, y| {
        y.len_a()
            .cmp(&x.len_a())
            .then(x.start_a.cmp(&y.start_a))
            .then(x.start_b.cmp(&y.start_b))
    });

    let mut accepted: Vec<Match> = Vec::new();
    for candidate in candidates {
        if !accepted
            .iter()
            .any(|m| m.overlaps_a(&candidate) || m.overlaps_b(&candidate))
        {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|m| (m.start_a, m.start_b));
    accepted
}

pub(crate) fn levenshtein_distance(source: &[char], target: &[char]) -> usize {
    let rows = source.len() + 1;
    let cols = target.len() + 1;

    let mut matrix = vec![vec![0; cols]; rows];

    for i in 0..rows {
        matrix[i][0] = i;
    }
    for j in 0..cols {
        matrix[0][j] = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let cost = if source[i - 1] == target[j - 1] { 0 } else { 1 };
            matrix[i][j] = *[
                matrix[i - 1][j] + 1,      // deletion
                matrix[i][j - 1] + 1,      // insertion
                matrix[i - 1][j - 1] + cost, // substitution
            ]
            .iter()
            .min()
            .unwrap();
        }
    }

    matrix[rows - 1][cols - 1]
}

pub(crate) fn levenshtein_similarity(source: &[char], target: &[char]) -> f64 {
    let max_len = source.len().max(target.len());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(source, target);
    1.0 - (distance as f64 / max_len as f64)
}
