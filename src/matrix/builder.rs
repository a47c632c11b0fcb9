//! Pairwise similarity and distance matrices.
//!
//! The builder is metric-agnostic: it takes any pairwise scoring function and
//! fills an `n x n` grid labelled by the text collection. Standardized
//! variants replace every off-diagonal cell by its z-score over the
//! off-diagonal population and pin the diagonal to 0. The diagonal is found by
//! index, never by comparing cell values to 100 or 0.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{RelateError, Result};
use crate::matrix::collection::TextCollection;
use crate::matrix::stats::OffDiagonalStatistics;

/// Upper bound of the similarity scale; distance is `MAX_SCORE - similarity`.
pub const MAX_SCORE: f64 = 100.0;

/// Which matrix to assemble from the raw pairwise scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Raw metric output
    #[default]
    Similarity,
    /// `100 - similarity`
    Distance,
    /// Off-diagonal z-scores of the similarity matrix
    #[serde(alias = "st_similarity")]
    StandardizedSimilarity,
    /// Off-diagonal z-scores of the distance matrix
    #[serde(alias = "st_distance")]
    StandardizedDistance,
}

impl MatrixKind {
    /// Every matrix kind, in display order.
    pub const ALL: [MatrixKind; 4] = [
        Self::Similarity,
        Self::Distance,
        Self::StandardizedSimilarity,
        Self::StandardizedDistance,
    ];

    /// Stable lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Similarity => "similarity",
            Self::Distance => "distance",
            Self::StandardizedSimilarity => "standardized_similarity",
            Self::StandardizedDistance => "standardized_distance",
        }
    }

    /// Whether cells hold distances rather than similarities.
    pub fn is_distance(self) -> bool {
        matches!(self, Self::Distance | Self::StandardizedDistance)
    }

    /// Whether off-diagonal cells are z-scores.
    pub fn is_standardized(self) -> bool {
        matches!(
            self,
            Self::StandardizedSimilarity | Self::StandardizedDistance
        )
    }
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixKind {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "similarity" => Ok(Self::Similarity),
            "distance" => Ok(Self::Distance),
            "standardized_similarity" | "st_similarity" => Ok(Self::StandardizedSimilarity),
            "standardized_distance" | "st_distance" => Ok(Self::StandardizedDistance),
            _ => Err(RelateError::unknown_matrix_kind(s)),
        }
    }
}

/// Square matrix with one label per row and column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMatrix {
    labels: Vec<String>,
    values: Array2<f64>,
}

impl LabeledMatrix {
    /// Wrap `values`, checking it is square and matches `labels`.
    pub fn new(labels: Vec<String>, values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != labels.len() || cols != labels.len() {
            return Err(RelateError::shape_mismatch(
                "matrix dimensions must equal the label count",
                labels.len(),
                if rows == labels.len() { cols } else { rows },
            ));
        }
        Ok(Self { labels, values })
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the matrix is `0 x 0`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row and column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Cell values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Consume the matrix, returning the raw grid.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Cell addressed by labels.
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<f64> {
        let row = self.labels.iter().position(|label| label == row)?;
        let col = self.labels.iter().position(|label| label == col)?;
        self.get(row, col)
    }

    /// Rows as plain vectors, in label order.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Whether `M[i][j] == M[j][i]` for every cell.
    pub fn is_symmetric(&self) -> bool {
        self.values
            .indexed_iter()
            .all(|((i, j), v)| self.values[(j, i)] == *v)
    }
}

/// Assembles pairwise matrices from a scoring function.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBuilder {
    parallel: bool,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl MatrixBuilder {
    /// Create a builder; rows are computed on the rayon pool when the
    /// `parallel` feature is enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable row-parallel computation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel && cfg!(feature = "parallel");
        self
    }

    /// Raw pairwise grid: cell `(i, j)` is `metric(rows[i], columns[j])`.
    ///
    /// Label counts are checked before any cell is computed; the first failing
    /// cell aborts the whole build.
    pub fn build<F, S, L>(
        &self,
        metric: F,
        rows: &[S],
        columns: &[S],
        labels: &[L],
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
        S: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        let n = labels.len();
        if rows.len() != n {
            return Err(RelateError::shape_mismatch(
                "row text count must match label count",
                n,
                rows.len(),
            ));
        }
        if columns.len() != n {
            return Err(RelateError::shape_mismatch(
                "column text count must match label count",
                n,
                columns.len(),
            ));
        }

        debug!(size = n, parallel = self.parallel, "Building pairwise matrix");

        let compute_row = |i: usize| -> Result<Vec<f64>> {
            columns
                .iter()
                .map(|column| metric(rows[i].as_ref(), column.as_ref()))
                .collect()
        };

        let grid: Vec<Vec<f64>> = if self.parallel {
            (0..n).into_par_iter().map(compute_row).collect::<Result<_>>()?
        } else {
            (0..n).map(compute_row).collect::<Result<_>>()?
        };

        let cells: Vec<f64> = grid.into_iter().flatten().collect();
        let actual = cells.len();
        let values = Array2::from_shape_vec((n, n), cells).map_err(|e| {
            RelateError::shape_mismatch(format!("matrix assembly failed: {e}"), n * n, actual)
        })?;

        LabeledMatrix::new(labels.iter().map(|l| l.as_ref().to_string()).collect(), values)
    }

    /// Similarity matrix: raw metric output.
    pub fn similarity<F, S, L>(
        &self,
        metric: F,
        rows: &[S],
        columns: &[S],
        labels: &[L],
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
        S: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        self.build(metric, rows, columns, labels)
    }

    /// Distance matrix: `100 - similarity` in every cell.
    pub fn distance<F, S, L>(
        &self,
        metric: F,
        rows: &[S],
        columns: &[S],
        labels: &[L],
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
        S: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        let mut matrix = self.build(metric, rows, columns, labels)?;
        matrix.values.mapv_inplace(|v| MAX_SCORE - v);
        Ok(matrix)
    }

    /// Similarity matrix with off-diagonal z-scores and a zero diagonal.
    pub fn standardized_similarity<F, S, L>(
        &self,
        metric: F,
        rows: &[S],
        columns: &[S],
        labels: &[L],
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
        S: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        standardize(self.similarity(metric, rows, columns, labels)?)
    }

    /// Distance matrix with off-diagonal z-scores and a zero diagonal.
    pub fn standardized_distance<F, S, L>(
        &self,
        metric: F,
        rows: &[S],
        columns: &[S],
        labels: &[L],
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
        S: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        standardize(self.distance(metric, rows, columns, labels)?)
    }

    /// Build the requested kind of matrix for every pair in `collection`.
    pub fn compute<F>(
        &self,
        kind: MatrixKind,
        metric: F,
        collection: &TextCollection,
    ) -> Result<LabeledMatrix>
    where
        F: Fn(&str, &str) -> Result<f64> + Sync,
    {
        let texts = collection.texts();
        let labels = collection.labels();
        match kind {
            MatrixKind::Similarity => self.similarity(metric, texts, texts, labels),
            MatrixKind::Distance => self.distance(metric, texts, texts, labels),
            MatrixKind::StandardizedSimilarity => {
                self.standardized_similarity(metric, texts, texts, labels)
            }
            MatrixKind::StandardizedDistance => {
                self.standardized_distance(metric, texts, texts, labels)
            }
        }
    }
}

/// Replace off-diagonal cells by z-scores and set the diagonal to 0.
pub fn standardize(mut matrix: LabeledMatrix) -> Result<LabeledMatrix> {
    let stats = OffDiagonalStatistics::from_matrix(&matrix.values)?;
    debug!(
        mean = stats.mean,
        std_dev = stats.std_dev,
        cells = stats.count,
        "Standardizing off-diagonal cells"
    );

    for ((i, j), value) in matrix.values.indexed_iter_mut() {
        *value = if i == j { 0.0 } else { stats.z_score(*value) };
    }
    Ok(matrix)
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
