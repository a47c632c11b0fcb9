//! Configuration types and management for relate-rs.
//!
//! Every knob the similarity core reads is carried explicitly in a
//! [`RelateConfig`] and handed to each computation; nothing is read from
//! process-wide state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::errors::{RelateError, Result};
use crate::matrix::builder::MatrixKind;
use crate::similarity::metrics::{MetricEngine, MetricKind};
use crate::similarity::shingle::ShingleConfig;

/// Main configuration for a matrix computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelateConfig {
    /// Shingle tokenization for set-based metrics
    #[serde(default)]
    pub shingle: ShingleConfig,

    /// Pairwise metric
    #[serde(default)]
    pub metric: MetricKind,

    /// Matrix assembled from the pairwise scores
    #[serde(default)]
    pub matrix: MatrixKind,

    /// Characters Hamming drops from position alignment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_characters: Vec<char>,

    /// Compute matrix rows in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for RelateConfig {
    fn default() -> Self {
        Self {
            shingle: ShingleConfig::default(),
            metric: MetricKind::default(),
            matrix: MatrixKind::default(),
            ignore_characters: Vec::new(),
            parallel: default_parallel(),
        }
    }
}

impl RelateConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RelateError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            RelateError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ignore_characters.iter().any(|c| c.is_whitespace())
            && self.metric == MetricKind::Hamming
        {
            warn!("Hamming ignore set contains whitespace; word boundaries will not be compared");
        }

        if !self.ignore_characters.is_empty() && self.metric != MetricKind::Hamming {
            warn!(
                metric = %self.metric,
                "ignore_characters only applies to the hamming metric and will be ignored"
            );
        }

        let mut seen = self.ignore_characters.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.ignore_characters.len() {
            return Err(RelateError::config_field(
                "ignore_characters contains duplicates",
                "ignore_characters",
            ));
        }

        Ok(())
    }

    /// Metric engine configured with this tokenization and ignore set.
    pub fn metric_engine(&self) -> MetricEngine {
        MetricEngine::new(self.shingle).with_ignore_characters(self.ignore_characters.iter().copied())
    }
}
