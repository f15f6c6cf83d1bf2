use crate::error::{Error, Result};

/// A maximal run of equal characters along one diagonal of the comparison
/// table, the anchor unit the approximate finder chains together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalRun {
    pub start_a: usize,
    pub start_b: usize,
    pub len: usize,
}

impl DiagonalRun {
    pub fn end_a(&self) -> usize {
        self.start_a + self.len
    }

    pub fn end_b(&self) -> usize {
        self.start_b + self.len
    }
}

/// Per-request tuning for a match finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderParams {
    /// Minimum length of the shorter side of a reported match.
    pub min_len: usize,
    /// Similarity-ratio threshold in (0, 1].
    pub ratio: f64,
    /// Budget of tolerated character edits bridged within one match.
    pub max_strikes: usize,
}

impl FinderParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_len == 0 {
            return Err(Error::invalid_input("minLen must be greater than 0"));
        }
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(Error::invalid_input(format!(
                "ratio must be in (0, 1], got {}",
                self.ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_endpoints() {
        let run = DiagonalRun { start_a: 5, start_b: 4, len: 3 };
        assert_eq!(run.end_a(), 8);
        assert_eq!(run.end_b(), 7);
    }

    #[test]
    fn params_validation() {
        assert!(FinderParams { min_len: 3, ratio: 0.7, max_strikes: 0 }.validate().is_ok());
        assert!(FinderParams { min_len: 0, ratio: 0.7, max_strikes: 0 }.validate().is_err());
        assert!(FinderParams { min_len: 3, ratio: 0.0, max_strikes: 0 }.validate().is_err());
        assert!(FinderParams { min_len: 3, ratio: 1.1, max_strikes: 0 }.validate().is_err());
    }
}
