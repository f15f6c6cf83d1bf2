use log::{debug, info};
use rayon::prelude::*;

use crate::config::IntihalConfig;
use crate::error::{Error, Result};
use crate::matcher::{
    gap_pairs, validate_matches, CosineScorer, FinderParams, MatchFinder, MatchFinderFactory,
};
use crate::types::{AlignmentRecord, AlignmentReport};

/// Per-request tuning passed alongside the two texts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonOptions {
    /// Minimum length of the shorter side of a reported match.
    pub min_len: usize,
    /// Similarity-ratio threshold in (0, 1].
    pub ratio: f64,
    /// Strike budget override; `None` uses the configured default.
    pub max_strikes: Option<usize>,
}

/// One comparison of an `analyse_batch` call.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonJob<'a> {
    pub text_a: &'a str,
    pub text_b: &'a str,
    pub options: ComparisonOptions,
}

/// The full alignment pipeline: finder → validator → gap pairing → cosine
/// scoring → report assembly.
///
/// A pipeline is a pure, reentrant function of its inputs. The only state
/// it holds is the immutable configuration (match-count bound, defaults)
/// and the finder it was built with; nothing is retained between requests,
/// so one instance can serve any number of threads.
pub struct ComparisonPipeline {
    config: IntihalConfig,
    finder: Box<dyn MatchFinder>,
}

impl ComparisonPipeline {
    /// Builds the pipeline with the finder named by the configuration.
    pub fn new(config: IntihalConfig) -> Self {
        let finder = MatchFinderFactory::create(config.matcher.finder);
        Self { config, finder }
    }

    /// Builds the pipeline around a caller-supplied finder. Any
    /// implementation honoring the `MatchFinder` contract can be slotted in
    /// without touching the pairing and scoring layers.
    pub fn with_finder(config: IntihalConfig, finder: Box<dyn MatchFinder>) -> Self {
        Self { config, finder }
    }

    pub fn config(&self) -> &IntihalConfig {
        &self.config
    }

    /// Options prefilled from the configured defaults.
    pub fn default_options(&self) -> ComparisonOptions {
        ComparisonOptions {
            min_len: self.config.matcher.default_min_len,
            ratio: self.config.matcher.default_ratio,
            max_strikes: None,
        }
    }

    /// Runs one comparison and assembles the report: every validated match
    /// as a `match = true` record carrying the finder's own ratio, and
    /// every qualifying gap pair as a `match = false` record carrying its
    /// cosine score. All ranges are char indices into the two inputs.
    pub fn analyse(
        &self,
        text_a: &str,
        text_b: &str,
        options: &ComparisonOptions,
    ) -> Result<AlignmentReport> {
        if text_a.is_empty() || text_b.is_empty() {
            return Err(Error::invalid_input("both texts must be non-empty"));
        }

        let params = FinderParams {
            min_len: options.min_len,
            ratio: options.ratio,
            max_strikes: options.max_strikes.unwrap_or(self.config.matcher.max_strikes),
        };
        params.validate()?;

        let chars_a: Vec<char> = text_a.chars().collect();
        let chars_b: Vec<char> = text_b.chars().collect();

        let matches = self.finder.find_matches(&chars_a, &chars_b, &params)?;
        validate_matches(
            &matches,
            chars_a.len(),
            chars_b.len(),
            &params,
            self.config.matcher.max_matches,
        )?;
        debug!(
            "Finder '{}' returned {} matches",
            self.finder.name(),
            matches.len()
        );

        let scorer = CosineScorer::from_texts(&chars_a, &chars_b);

        let mut pairs = Vec::with_capacity(matches.len());
        for m in &matches {
            pairs.push(AlignmentRecord {
                a: (m.start_a, m.end_a),
                b: (m.start_b, m.end_b),
                similarity: m.ratio,
                is_match: true,
            });
        }
        for gap in gap_pairs(&matches, &chars_a, &chars_b) {
            pairs.push(AlignmentRecord {
                a: gap.a_range,
                b: gap.b_range,
                similarity: scorer.score(gap.span_a, gap.span_b),
                is_match: false,
            });
        }

        info!(
            "Number of matches: {}. Length of textA: {}. Length of textB: {}.",
            matches.len(),
            chars_a.len(),
            chars_b.len()
        );

        Ok(AlignmentReport { pairs })
    }

    /// Runs independent comparisons on a bounded worker pool sized by the
    /// processor configuration. Each job succeeds or fails on its own.
    pub fn analyse_batch(&self, jobs: &[ComparisonJob<'_>]) -> Result<Vec<Result<AlignmentReport>>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.processor.resolved_threads())
            .build()?;

        info!(
            "Dispatching {} comparisons on {} worker threads",
            jobs.len(),
            self.config.processor.resolved_threads()
        );

        Ok(pool.install(|| {
            jobs.par_iter()
                .map(|job| self.analyse(job.text_a, job.text_b, &job.options))
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FinderKind;

    fn pipeline() -> ComparisonPipeline {
        ComparisonPipeline::new(IntihalConfig::default())
    }

    fn options(min_len: usize, ratio: f64, max_strikes: Option<usize>) -> ComparisonOptions {
        ComparisonOptions { min_len, ratio, max_strikes }
    }

    #[test]
    fn identical_texts_report_one_match_and_no_gaps() {
        let report = pipeline()
            .analyse("identical text", "identical text", &options(3, 1.0, None))
            .unwrap();

        assert_eq!(report.pairs.len(), 1);
        let record = &report.pairs[0];
        assert!(record.is_match);
        assert_eq!(record.a, (0, 14));
        assert_eq!(record.b, (0, 14));
        assert_eq!(record.similarity, 1.0);
    }

    #[test]
    fn single_edit_reports_two_matches() {
        let report = pipeline()
            .analyse("abcdzefg", "abcdefg", &options(3, 0.7, None))
            .unwrap();

        assert_eq!(report.matches().count(), 2);
        // The B-side region between the matches is empty, so no gap record
        // forms.
        assert_eq!(report.gaps().count(), 0);
    }

    #[test]
    fn substituted_region_becomes_a_gap_record() {
        let report = pipeline()
            .analyse("abcdXefg", "abcdYefg", &options(3, 0.7, None))
            .unwrap();

        assert_eq!(report.matches().count(), 2);
        let gaps: Vec<_> = report.gaps().collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].a, (4, 5));
        assert_eq!(gaps[0].b, (4, 5));
        assert_eq!(gaps[0].similarity, 0.0);
    }

    #[test]
    fn permuted_gap_scores_full_similarity() {
        let report = pipeline()
            .analyse("abcd12efg", "abcd21efg", &options(3, 1.0, None))
            .unwrap();

        assert_eq!(report.matches().count(), 2);
        let gaps: Vec<_> = report.gaps().collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].a, (4, 6));
        assert_eq!(gaps[0].b, (4, 6));
        assert!((gaps[0].similarity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn strike_budget_override_merges_the_edit() {
        let report = pipeline()
            .analyse("abcdzefg", "abcdefg", &options(3, 0.7, Some(2)))
            .unwrap();

        assert_eq!(report.pairs.len(), 1);
        let record = &report.pairs[0];
        assert!(record.is_match);
        assert_eq!(record.a, (0, 8));
        assert_eq!(record.b, (0, 7));
        assert!((record.similarity - 0.875).abs() < 1e-9);
    }

    #[test]
    fn degenerate_input_fails_with_true_count() {
        // 120 distinct characters against their reversal: every char pairs
        // exactly once and nothing chains, so the finder reports 120
        // single-char matches.
        let text_a: String = (0..120)
            .map(|i| char::from_u32(0x4E00 + i).unwrap())
            .collect();
        let text_b: String = text_a.chars().rev().collect();

        let err = pipeline()
            .analyse(&text_a, &text_b, &options(1, 1.0, None))
            .unwrap_err();
        match err {
            Error::TooManyMatches { count, limit } => {
                assert_eq!(count, 120);
                assert_eq!(limit, 100);
            }
            other => panic!("expected TooManyMatches, got {other:?}"),
        }
    }

    #[test]
    fn empty_text_is_invalid_input() {
        let err = pipeline()
            .analyse("", "abc", &options(3, 1.0, None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn bad_ratio_is_invalid_input() {
        let err = pipeline()
            .analyse("abc", "abc", &options(3, 0.0, None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn report_serializes_as_pairs_document() {
        let report = pipeline()
            .analyse("identical text", "identical text", &options(3, 1.0, None))
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"pairs":[{"a":[0,14],"b":[0,14],"similarity":1.0,"match":true}]}"#
        );
    }

    #[test]
    fn exact_finder_can_be_configured() {
        let mut config = IntihalConfig::default();
        config.matcher.finder = FinderKind::Exact;
        let report = ComparisonPipeline::new(config)
            .analyse("abcdzefg", "abcdefg", &options(3, 1.0, None))
            .unwrap();
        assert_eq!(report.matches().count(), 2);
    }

    #[test]
    fn default_options_come_from_config() {
        let opts = pipeline().default_options();
        assert_eq!(opts.min_len, 3);
        assert_eq!(opts.ratio, 1.0);
        assert_eq!(opts.max_strikes, None);
    }

    #[test]
    fn batch_matches_individual_results() {
        let pipeline = pipeline();
        let opts = options(3, 0.7, None);
        let jobs = vec![
            ComparisonJob { text_a: "abcdzefg", text_b: "abcdefg", options: opts },
            ComparisonJob { text_a: "identical text", text_b: "identical text", options: opts },
            ComparisonJob { text_a: "", text_b: "abc", options: opts },
        ];

        let results = pipeline.analyse_batch(&jobs).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &pipeline.analyse("abcdzefg", "abcdefg", &opts).unwrap()
        );
        assert_eq!(results[1].as_ref().unwrap().pairs.len(), 1);
        assert!(results[2].is_err());
    }
}
