use ahash::AHashMap;
use log::trace;

/// Character-frequency cosine scorer for gap spans.
///
/// Built once per request from the baseline alphabet — every distinct char
/// appearing anywhere in either document — so the two frequency vectors of
/// any later comparison share one basis and one dimensionality. A bag-of-
/// characters measure: cheap, alphabet-size-bounded, and a usable proxy for
/// two non-matching stretches still being typographically similar.
pub struct CosineScorer {
    index: AHashMap<char, usize>,
}

impl CosineScorer {
    /// Derives the baseline alphabet from the two request documents.
    pub fn from_texts(a: &[char], b: &[char]) -> Self {
        let mut index = AHashMap::new();
        for &c in a.iter().chain(b.iter()) {
            let next = index.len();
            index.entry(c).or_insert(next);
        }
        trace!("Baseline alphabet has {} distinct characters", index.len());
        Self { index }
    }

    pub fn alphabet_size(&self) -> usize {
        self.index.len()
    }

    fn count_vector(&self, span: &[char]) -> Vec<u64> {
        let mut counts = vec![0u64; self.index.len()];
        for c in span {
            if let Some(&i) = self.index.get(c) {
                counts[i] += 1;
            }
        }
        counts
    }

    /// Cosine similarity of the two spans' frequency vectors, in [0, 1].
    ///
    /// Zero-magnitude policy: two zero vectors score 1.0, a zero vector
    /// against a non-zero one scores 0.0. Applied uniformly; NaN is never
    /// returned.
    pub fn score(&self, span_a: &[char], span_b: &[char]) -> f64 {
        let vec_a = self.count_vector(span_a);
        let vec_b = self.count_vector(span_b);

        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (&x, &y) in vec_a.iter().zip(vec_b.iter()) {
            dot += x as f64 * y as f64;
            norm_a += x as f64 * x as f64;
            norm_b += y as f64 * y as f64;
        }

        if norm_a == 0.0 && norm_b == 0.0 {
            return 1.0;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b).sqrt()
    }
}
