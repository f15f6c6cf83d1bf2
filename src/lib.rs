//! intihal compares two documents and reports where they are approximately
//! the same, plus a character-frequency cosine score for every pair of gaps
//! lying between non-crossing matches. It is the alignment engine behind a
//! duplicate/plagiarism-style checker.

// Module declarations
pub mod error;
pub mod config;
pub mod matcher;
pub mod pipeline;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use matcher::{MatchFinder, LevenshteinFinder, ExactFinder, CosineScorer, FinderParams};
pub use pipeline::{ComparisonPipeline, ComparisonOptions, ComparisonJob};
pub use types::{Match, AlignmentRecord, AlignmentReport};

// Re-export the config from config module
pub use config::IntihalConfig;
