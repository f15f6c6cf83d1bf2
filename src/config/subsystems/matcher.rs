// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// Which match finder implementation the pipeline is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinderKind {
    Levenshtein,
    Exact,
}

impl FinderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinderKind::Levenshtein => "levenshtein",
            FinderKind::Exact => "exact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "levenshtein" => Some(Self::Levenshtein),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

impl Default for FinderKind {
    fn default() -> Self {
        Self::Levenshtein
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Finder implementation to build the pipeline with.
    pub finder: FinderKind,
    /// Upper bound on accepted match count. The gap-pairing step is
    /// quadratic in match count, and an unbounded count signals degenerate
    /// input.
    pub max_matches: usize,
    /// Default budget of tolerated character edits within one match, used
    /// when a request does not supply its own.
    pub max_strikes: usize,
    /// Default minimum match length for requests that leave it unset.
    pub default_min_len: usize,
    /// Default similarity-ratio threshold for requests that leave it unset.
    pub default_ratio: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            finder: FinderKind::default(),
            max_matches: 100,
            max_strikes: 0,
            default_min_len: 3,
            default_ratio: 1.0,
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "matcher" {
            return None;
        }

        match key {
            "finder" => {
                self.finder = match FinderKind::from_str(value) {
                    Some(kind) => kind,
                    None => return Some(Err(Error::Config(
                        format!("Invalid finder: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            "max_matches" => {
                match value.parse() {
                    Ok(count) if count > 0 => {
                        self.max_matches = count;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid max_matches (must be > 0): {}", value)
                    ))),
                }
            },
            "max_strikes" => {
                match value.parse() {
                    Ok(strikes) => {
                        self.max_strikes = strikes;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid max_strikes: {}", value)
                    ))),
                }
            },
            "default_min_len" => {
                match value.parse() {
                    Ok(len) if len > 0 => {
                        self.default_min_len = len;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid default_min_len (must be > 0): {}", value)
                    ))),
                }
            },
            "default_ratio" => {
                match value.parse::<f64>() {
                    Ok(ratio) if ratio > 0.0 && ratio <= 1.0 => {
                        self.default_ratio = ratio;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid default_ratio (must be in (0, 1]): {}", value)
                    ))),
                }
            },

            // Unknown key
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_matches == 0 {
            return Err(Error::Config(
                "max_matches must be greater than 0".to_string()
            ));
        }
        if self.default_min_len == 0 {
            return Err(Error::Config(
                "default_min_len must be greater than 0".to_string()
            ));
        }
        if !(self.default_ratio > 0.0 && self.default_ratio <= 1.0) {
            return Err(Error::Config(
                "default_ratio must be in (0, 1]".to_string()
            ));
        }
        Ok(())
    }
}
