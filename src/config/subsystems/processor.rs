// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Worker threads for batch comparisons. 0 selects one per available
    /// CPU.
    pub threads: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

impl ProcessorConfig {
    /// The actual thread count to build the worker pool with.
    pub fn resolved_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "threads" => {
                match value.parse() {
                    Ok(threads) => {
                        self.threads = threads;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid threads: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}
