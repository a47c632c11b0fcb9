//! Population statistics over the off-diagonal cells of a square matrix.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::core::errors::{RelateError, Result};

/// Mean and sample standard deviation of every cell `(i, j)` with `i != j`.
///
/// Both `(i, j)` and `(j, i)` count, so a symmetric matrix contributes each
/// pair twice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffDiagonalStatistics {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (denominator `count - 1`)
    pub std_dev: f64,
    /// Number of off-diagonal cells
    pub count: usize,
}

impl OffDiagonalStatistics {
    /// Collect the off-diagonal cells of `values` and summarize them.
    ///
    /// Fails with `DivideByZero` when fewer than two cells exist or when all
    /// of them are equal.
    pub fn from_matrix(values: &Array2<f64>) -> Result<Self> {
        let population = off_diagonal(values);
        Self::from_values(&population)
    }

    /// Summarize an explicit population.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let count = values.len();
        if count < 2 {
            return Err(RelateError::divide_by_zero(format!(
                "standardization needs at least 2 off-diagonal cells, found {count}"
            ))
            .with_context("standardize"));
        }

        if values.iter().all(|v| *v == values[0]) {
            return Err(RelateError::divide_by_zero(
                "standard deviation is zero: all off-diagonal cells are equal",
            )
            .with_context("standardize"));
        }

        let mean = values.iter().mean();
        let std_dev = values.iter().std_dev();
        if !std_dev.is_finite() || std_dev == 0.0 {
            return Err(
                RelateError::divide_by_zero("standard deviation is zero").with_context("standardize")
            );
        }

        Ok(Self {
            mean,
            std_dev,
            count,
        })
    }

    /// Z-score of `value` against this population.
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// Off-diagonal cells in row-major order.
pub fn off_diagonal(values: &Array2<f64>) -> Vec<f64> {
    values
        .indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, v)| *v)
        .collect()
}
