pub mod algorithms;
pub mod gaps;
pub mod similarity;
pub mod types;
pub mod validation;

// Re-export the main types
pub use self::algorithms::{MatchFinder, MatchFinderFactory, LevenshteinFinder, ExactFinder};
pub use self::gaps::{gap_pairs, GapPair};
pub use self::similarity::CosineScorer;
pub use self::types::{DiagonalRun, FinderParams};
pub use self::validation::validate_matches;
