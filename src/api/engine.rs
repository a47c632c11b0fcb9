//! Main relate engine implementation.

use tracing::{debug, info};

use crate::core::config::RelateConfig;
use crate::core::errors::Result;
use crate::io::reports::MatrixReport;
use crate::matrix::builder::{LabeledMatrix, MatrixBuilder};
use crate::matrix::collection::TextCollection;
use crate::similarity::metrics::MetricEngine;

/// Binds one [`RelateConfig`] to a metric engine and matrix builder.
#[derive(Debug, Clone)]
pub struct RelateEngine {
    config: RelateConfig,
    metrics: MetricEngine,
    builder: MatrixBuilder,
}

impl RelateEngine {
    /// Validate `config` and prepare an engine for it.
    pub fn new(config: RelateConfig) -> Result<Self> {
        config.validate()?;

        let metrics = config.metric_engine();
        let builder = MatrixBuilder::new().with_parallel(config.parallel);

        info!(
            metric = %config.metric,
            matrix = %config.matrix,
            shingle_length = config.shingle.length.get(),
            shingle_mode = %config.shingle.mode,
            "Relate engine initialized"
        );

        Ok(Self {
            config,
            metrics,
            builder,
        })
    }

    /// Configuration this engine runs with.
    pub fn config(&self) -> &RelateConfig {
        &self.config
    }

    /// Metric engine this engine scores with.
    pub fn metrics(&self) -> &MetricEngine {
        &self.metrics
    }

    /// Score a single pair with the configured metric.
    pub fn compare(&self, a: &str, b: &str) -> Result<f64> {
        self.metrics.score(self.config.metric, a, b)
    }

    /// Build the configured matrix over every pair in `collection`.
    pub fn compute(&self, collection: &TextCollection) -> Result<LabeledMatrix> {
        debug!(texts = collection.len(), "Computing pairwise matrix");
        self.builder.compute(
            self.config.matrix,
            self.metrics.metric_fn(self.config.metric),
            collection,
        )
    }

    /// Build the configured matrix and wrap it for rendering.
    pub fn report(&self, collection: &TextCollection) -> Result<MatrixReport> {
        let matrix = self.compute(collection)?;
        Ok(MatrixReport::new(
            self.config.metric,
            self.config.matrix,
            &matrix,
        ))
    }
}
