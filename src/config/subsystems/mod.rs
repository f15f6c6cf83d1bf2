pub mod matcher;
pub mod processor;

pub use matcher::{MatcherConfig, FinderKind};
pub use processor::ProcessorConfig;
