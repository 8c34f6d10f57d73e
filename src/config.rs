use crate::randomization::RandomizationConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Service configuration, read from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub bind_addr: String,
    /// Graphs with at least this many nodes use the parallel betweenness
    pub parallel_threshold: usize,
    /// Swap budget used when a randomize request leaves it out
    pub randomization: RandomizationConfig,
    /// Upper bound on graphs held in memory
    pub max_graphs: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3005".to_string(),
            parallel_threshold: 200,
            randomization: RandomizationConfig::default(),
            max_graphs: 1024,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = RandomizationConfig::default();
        Ok(ServiceConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3005".to_string()),
            parallel_threshold: env::var("PARALLEL_THRESHOLD")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .context("PARALLEL_THRESHOLD must be a non-negative integer")?,
            randomization: RandomizationConfig {
                n_iter: env::var("DEFAULT_N_ITER")
                    .unwrap_or_else(|_| defaults.n_iter.to_string())
                    .parse()
                    .context("DEFAULT_N_ITER must be a non-negative integer")?,
                fail_max: env::var("DEFAULT_FAIL_MAX")
                    .unwrap_or_else(|_| defaults.fail_max.to_string())
                    .parse()
                    .context("DEFAULT_FAIL_MAX must be a non-negative integer")?,
            },
            max_graphs: env::var("MAX_GRAPHS")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .context("MAX_GRAPHS must be a non-negative integer")?,
        })
    }
}
