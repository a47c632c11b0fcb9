//! String similarity metrics on a 0-100 scale.
//!
//! Jaccard, Sørensen–Dice and Overlap compare the distinct shingle sets of two
//! texts. Hamming and Levenshtein work directly on the character sequences and
//! never touch the shingler. All of them are reached through [`MetricKind`]
//! and [`MetricEngine::score`], so callers stay metric-agnostic.
//!
//! Scores are rounded to six fractional digits. That rounding is part of the
//! result, not a display concern: matrices built from these scores compare
//! exactly across runs.

use std::fmt;
use std::str::FromStr;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::errors::{RelateError, Result};
use crate::similarity::shingle::{ShingleConfig, Shingler};

/// Fractional digits kept in every metric result.
pub const SCORE_PRECISION: i32 = 6;

/// Round a score to [`SCORE_PRECISION`] fractional digits.
pub fn round_score(value: f64) -> f64 {
    let scale = 10f64.powi(SCORE_PRECISION);
    (value * scale).round() / scale
}

/// Closed set of supported similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// `|A∩B| / |A∪B|` over shingle sets
    #[default]
    Jaccard,
    /// `2|A∩B| / (|A|+|B|)` over shingle sets
    #[serde(alias = "sørensen_dice")]
    SorensenDice,
    /// `|A∩B| / min(|A|,|B|)` over shingle sets
    Overlap,
    /// Share of agreeing positions in equal-length strings
    Hamming,
    /// `1 - edit_distance / max_len` over raw strings
    Levenshtein,
}

impl MetricKind {
    /// Every supported metric, in display order.
    pub const ALL: [MetricKind; 5] = [
        Self::Jaccard,
        Self::SorensenDice,
        Self::Overlap,
        Self::Hamming,
        Self::Levenshtein,
    ];

    /// Stable lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jaccard => "jaccard",
            Self::SorensenDice => "sorensen_dice",
            Self::Overlap => "overlap",
            Self::Hamming => "hamming",
            Self::Levenshtein => "levenshtein",
        }
    }

    /// Whether the metric compares shingle sets rather than raw characters.
    pub fn uses_shingles(self) -> bool {
        matches!(self, Self::Jaccard | Self::SorensenDice | Self::Overlap)
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::Jaccard => "shared shingles / all distinct shingles",
            Self::SorensenDice => "2 x shared shingles / sum of both set sizes",
            Self::Overlap => "shared shingles / size of the smaller set",
            Self::Hamming => "agreeing positions / compared positions (equal lengths only)",
            Self::Levenshtein => "1 - edit distance / length of the longer string",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "jaccard" => Ok(Self::Jaccard),
            "sorensen_dice" | "sørensen_dice" | "dice" => Ok(Self::SorensenDice),
            "overlap" => Ok(Self::Overlap),
            "hamming" => Ok(Self::Hamming),
            "levenshtein" => Ok(Self::Levenshtein),
            _ => Err(RelateError::unknown_metric(s)),
        }
    }
}

/// Jaccard index of two token sets, scaled to 0-100.
pub fn jaccard_index<T>(a: &AHashSet<T>, b: &AHashSet<T>) -> Result<f64>
where
    T: Eq + std::hash::Hash,
{
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return Err(RelateError::divide_by_zero("both token sets are empty").with_context("jaccard"));
    }
    Ok(round_score(100.0 * intersection as f64 / union as f64))
}

/// Sørensen–Dice coefficient of two token sets, scaled to 0-100.
pub fn sorensen_dice_coefficient<T>(a: &AHashSet<T>, b: &AHashSet<T>) -> Result<f64>
where
    T: Eq + std::hash::Hash,
{
    let total = a.len() + b.len();
    if total == 0 {
        return Err(
            RelateError::divide_by_zero("both token sets are empty").with_context("sorensen_dice"),
        );
    }
    let intersection = a.intersection(b).count();
    Ok(round_score(100.0 * (2 * intersection) as f64 / total as f64))
}

/// Overlap coefficient of two token sets, scaled to 0-100.
pub fn overlap_coefficient<T>(a: &AHashSet<T>, b: &AHashSet<T>) -> Result<f64>
where
    T: Eq + std::hash::Hash,
{
    let smaller = a.len().min(b.len());
    if smaller == 0 {
        return Err(
            RelateError::divide_by_zero("the smaller token set is empty").with_context("overlap"),
        );
    }
    let intersection = a.intersection(b).count();
    Ok(round_score(100.0 * intersection as f64 / smaller as f64))
}

/// Hamming similarity of two equal-length strings, scaled to 0-100.
///
/// Position pairs where either side is in `ignore` are dropped from both the
/// numerator and the denominator.
pub fn hamming_similarity(a: &str, b: &str, ignore: &AHashSet<char>) -> Result<f64> {
    let left = a.chars().count();
    let right = b.chars().count();
    if left != right {
        return Err(RelateError::length_mismatch(
            "hamming similarity requires strings of equal length",
            left,
            right,
        ));
    }

    let (compared, agreeing) = a
        .chars()
        .zip(b.chars())
        .filter(|(x, y)| !ignore.contains(x) && !ignore.contains(y))
        .fold((0usize, 0usize), |(compared, agreeing), (x, y)| {
            (compared + 1, agreeing + usize::from(x == y))
        });

    if compared == 0 {
        return Err(RelateError::divide_by_zero(
            "no character positions left to compare after filtering",
        )
        .with_context("hamming"));
    }
    Ok(round_score(100.0 * agreeing as f64 / compared as f64))
}

/// Levenshtein similarity of two strings of any length, scaled to 0-100.
pub fn levenshtein_similarity(a: &str, b: &str) -> Result<f64> {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return Err(RelateError::divide_by_zero("both strings are empty").with_context("levenshtein"));
    }
    let distance = edit_distance::edit_distance(a, b);
    Ok(round_score(100.0 * (1.0 - distance as f64 / longest as f64)))
}

/// Dispatches named metrics under one tokenization and filtering policy.
#[derive(Debug, Clone, Default)]
pub struct MetricEngine {
    shingler: Shingler,
    ignore_characters: AHashSet<char>,
}

impl MetricEngine {
    /// Create an engine with the given shingle policy and no ignored characters.
    pub fn new(shingle: ShingleConfig) -> Self {
        Self {
            shingler: Shingler::new(shingle),
            ignore_characters: AHashSet::new(),
        }
    }

    /// Set the characters Hamming skips when aligning positions.
    pub fn with_ignore_characters(mut self, ignore: impl IntoIterator<Item = char>) -> Self {
        self.ignore_characters = ignore.into_iter().collect();
        self
    }

    /// Shingler used by the set-based metrics.
    pub fn shingler(&self) -> &Shingler {
        &self.shingler
    }

    /// Characters Hamming skips.
    pub fn ignore_characters(&self) -> &AHashSet<char> {
        &self.ignore_characters
    }

    /// Score `a` against `b` with the chosen metric.
    pub fn score(&self, metric: MetricKind, a: &str, b: &str) -> Result<f64> {
        match metric {
            MetricKind::Jaccard => self.jaccard(a, b),
            MetricKind::SorensenDice => self.sorensen_dice(a, b),
            MetricKind::Overlap => self.overlap(a, b),
            MetricKind::Hamming => self.hamming(a, b),
            MetricKind::Levenshtein => levenshtein_similarity(a, b),
        }
    }

    /// Bind a metric to this engine as a plain pairwise function.
    pub fn metric_fn(&self, metric: MetricKind) -> impl Fn(&str, &str) -> Result<f64> + Sync + '_ {
        move |a: &str, b: &str| self.score(metric, a, b)
    }

    /// Jaccard similarity of the shingle sets of `a` and `b`.
    pub fn jaccard(&self, a: &str, b: &str) -> Result<f64> {
        jaccard_index(&self.shingler.token_set(a), &self.shingler.token_set(b))
    }

    /// Sørensen–Dice similarity of the shingle sets of `a` and `b`.
    pub fn sorensen_dice(&self, a: &str, b: &str) -> Result<f64> {
        sorensen_dice_coefficient(&self.shingler.token_set(a), &self.shingler.token_set(b))
    }

    /// Overlap similarity of the shingle sets of `a` and `b`.
    pub fn overlap(&self, a: &str, b: &str) -> Result<f64> {
        overlap_coefficient(&self.shingler.token_set(a), &self.shingler.token_set(b))
    }

    /// Hamming similarity honouring the engine's ignore characters.
    pub fn hamming(&self, a: &str, b: &str) -> Result<f64> {
        hamming_similarity(a, b, &self.ignore_characters)
    }

    /// Levenshtein similarity; shingling does not apply.
    pub fn levenshtein(&self, a: &str, b: &str) -> Result<f64> {
        levenshtein_similarity(a, b)
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
