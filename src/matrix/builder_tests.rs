use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use proptest::prelude::*;

use super::*;
use crate::similarity::metrics::{MetricEngine, MetricKind};
use crate::similarity::shingle::{ShingleConfig, ShingleMode};

/// Symmetric lookup metric: equal texts score 100, listed pairs score their value.
fn table_metric(
    pairs: &'static [(&'static str, &'static str, f64)],
) -> impl Fn(&str, &str) -> Result<f64> + Sync {
    move |a: &str, b: &str| {
        if a == b {
            return Ok(100.0);
        }
        pairs
            .iter()
            .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
            .map(|(_, _, score)| *score)
            .ok_or_else(|| RelateError::validation(format!("no score for {a}/{b}")))
    }
}

const ABC: &[(&str, &str, f64)] = &[("a", "b", 50.0), ("a", "c", 50.0), ("b", "c", 20.0)];

fn texts() -> Vec<&'static str> {
    vec!["a", "b", "c"]
}

fn labels() -> Vec<&'static str> {
    vec!["text_a", "text_b", "text_c"]
}

#[test]
fn test_similarity_matrix_layout() {
    let builder = MatrixBuilder::new().with_parallel(false);
    let matrix = builder
        .similarity(table_metric(ABC), &texts(), &texts(), &labels())
        .unwrap();

    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.labels(), &["text_a", "text_b", "text_c"]);
    assert_eq!(
        matrix.to_rows(),
        vec![
            vec![100.0, 50.0, 50.0],
            vec![50.0, 100.0, 20.0],
            vec![50.0, 20.0, 100.0],
        ]
    );
    assert_eq!(matrix.get_by_label("text_b", "text_c"), Some(20.0));
    assert_eq!(matrix.get_by_label("text_b", "missing"), None);
    assert!(matrix.is_symmetric());
}

#[test]
fn test_distance_matrix_inverts_scale() {
    let builder = MatrixBuilder::new();
    let matrix = builder
        .distance(table_metric(ABC), &texts(), &texts(), &labels())
        .unwrap();

    assert_eq!(
        matrix.to_rows(),
        vec![
            vec![0.0, 50.0, 50.0],
            vec![50.0, 0.0, 80.0],
            vec![50.0, 80.0, 0.0],
        ]
    );
}

#[test]
fn test_standardized_similarity() {
    let builder = MatrixBuilder::new();
    let matrix = builder
        .standardized_similarity(table_metric(ABC), &texts(), &texts(), &labels())
        .unwrap();

    // population [50, 50, 50, 20, 50, 20]: mean 40, sample sd sqrt(240)
    let sd = 240.0f64.sqrt();
    for i in 0..3 {
        assert_eq!(matrix.get(i, i), Some(0.0));
    }
    let ab = matrix.get(0, 1).unwrap();
    let ac = matrix.get(0, 2).unwrap();
    let bc = matrix.get(1, 2).unwrap();
    assert_eq!(ab, ac);
    assert_relative_eq!(ab, 10.0 / sd, epsilon = 1e-12);
    assert_relative_eq!(bc, -20.0 / sd, epsilon = 1e-12);
    assert!(matrix.is_symmetric());
}

#[test]
fn test_standardized_distance() {
    let builder = MatrixBuilder::new();
    let matrix = builder
        .standardized_distance(table_metric(ABC), &texts(), &texts(), &labels())
        .unwrap();

    // distances [50, 50, 50, 80, 50, 80]: mean 60, same spread as similarity
    let sd = 240.0f64.sqrt();
    assert_eq!(matrix.get(1, 1), Some(0.0));
    assert_relative_eq!(matrix.get(0, 1).unwrap(), -10.0 / sd, epsilon = 1e-12);
    assert_relative_eq!(matrix.get(2, 1).unwrap(), 20.0 / sd, epsilon = 1e-12);
}

#[test]
fn test_off_diagonal_perfect_scores_are_standardized() {
    const DUPES: &[(&str, &str, f64)] = &[("x", "y", 10.0)];
    let rows = ["x", "x", "y"];
    let builder = MatrixBuilder::new();
    let matrix = builder
        .standardized_similarity(table_metric(DUPES), &rows, &rows, &["one", "two", "three"])
        .unwrap();

    // (0, 1) is a genuine 100 between two different texts and must not be zeroed
    let z = matrix.get(0, 1).unwrap();
    assert!(z > 0.0);
    assert_eq!(matrix.get(1, 0), Some(z));
    assert_eq!(matrix.get(0, 0), Some(0.0));
}

#[test]
fn test_standardization_needs_two_texts() {
    let builder = MatrixBuilder::new();
    let err = builder
        .standardized_similarity(table_metric(ABC), &["a"], &["a"], &["only"])
        .unwrap_err();
    assert!(matches!(err, RelateError::DivideByZero { .. }));
}

#[test]
fn test_standardization_rejects_constant_population() {
    const FLAT: &[(&str, &str, f64)] = &[("a", "b", 30.0), ("a", "c", 30.0), ("b", "c", 30.0)];
    let builder = MatrixBuilder::new();
    let err = builder
        .standardized_distance(table_metric(FLAT), &texts(), &texts(), &labels())
        .unwrap_err();
    assert!(matches!(err, RelateError::DivideByZero { .. }));
}

#[test]
fn test_shape_mismatch_fails_before_scoring() {
    let calls = AtomicUsize::new(0);
    let metric = |_: &str, _: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, RelateError>(1.0)
    };

    let builder = MatrixBuilder::new();
    let err = builder
        .similarity(&metric, &texts(), &texts(), &["x", "y"])
        .unwrap_err();
    assert!(matches!(
        err,
        RelateError::ShapeMismatch {
            expected: 2,
            actual: 3,
            ..
        }
    ));

    let err = builder
        .distance(&metric, &texts(), &["a", "b"], &labels())
        .unwrap_err();
    assert!(matches!(err, RelateError::ShapeMismatch { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failing_cell_aborts_build() {
    let engine = MetricEngine::default();
    let rows = ["abcd", "abcd", "abc"];
    for parallel in [false, true] {
        let builder = MatrixBuilder::new().with_parallel(parallel);
        let err = builder
            .similarity(engine.metric_fn(MetricKind::Hamming), &rows, &rows, &labels())
            .unwrap_err();
        assert!(matches!(err, RelateError::LengthMismatch { .. }));
    }
}

#[test]
fn test_compute_dispatches_on_kind() {
    let engine = MetricEngine::default();
    let collection = TextCollection::new(
        vec![
            "the quick brown fox".to_string(),
            "the quick brown dog".to_string(),
            "a lazy dog sleeps".to_string(),
        ],
        vec!["fox".to_string(), "dog".to_string(), "lazy".to_string()],
    )
    .unwrap();
    let builder = MatrixBuilder::new();

    for kind in MatrixKind::ALL {
        let matrix = builder
            .compute(kind, engine.metric_fn(MetricKind::Jaccard), &collection)
            .unwrap();
        assert_eq!(matrix.values().dim(), (3, 3));
        assert_eq!(matrix.labels(), collection.labels());
        assert!(matrix.is_symmetric());
        let expected_diagonal = match kind {
            MatrixKind::Similarity => 100.0,
            _ => 0.0,
        };
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(expected_diagonal));
        }
    }
}

#[test]
fn test_empty_collection_builds_empty_matrix() {
    let builder = MatrixBuilder::new();
    let empty: [&str; 0] = [];
    let matrix = builder
        .similarity(table_metric(ABC), &empty, &empty, &empty)
        .unwrap();
    assert!(matrix.is_empty());
}

#[test]
fn test_labeled_matrix_rejects_bad_shape() {
    let err = LabeledMatrix::new(vec!["a".to_string()], Array2::zeros((2, 2))).unwrap_err();
    assert!(matches!(err, RelateError::ShapeMismatch { .. }));
}

#[test]
fn test_matrix_kind_names() {
    assert_eq!(
        "st_similarity".parse::<MatrixKind>().unwrap(),
        MatrixKind::StandardizedSimilarity
    );
    assert_eq!(
        "standardized-distance".parse::<MatrixKind>().unwrap(),
        MatrixKind::StandardizedDistance
    );
    assert!(matches!(
        "heatmap".parse::<MatrixKind>().unwrap_err(),
        RelateError::UnknownMatrixKind { .. }
    ));
    for kind in MatrixKind::ALL {
        assert_eq!(kind.as_str().parse::<MatrixKind>().unwrap(), kind);
    }
    assert!(MatrixKind::StandardizedDistance.is_distance());
    assert!(!MatrixKind::Distance.is_standardized());
}

proptest! {
    #[test]
    fn prop_distance_is_dual_of_similarity(
        texts in proptest::collection::vec("[a-e]{4,16}", 2..5)
    ) {
        let engine = MetricEngine::new(ShingleConfig::new(NonZeroUsize::new(2).unwrap(), ShingleMode::Characters));
        let labels: Vec<String> = (0..texts.len()).map(|i| format!("t{i}")).collect();
        let builder = MatrixBuilder::new();

        for metric in [MetricKind::Jaccard, MetricKind::SorensenDice, MetricKind::Overlap, MetricKind::Levenshtein] {
            let similarity = builder.similarity(engine.metric_fn(metric), &texts, &texts, &labels).unwrap();
            let distance = builder.distance(engine.metric_fn(metric), &texts, &texts, &labels).unwrap();
            prop_assert!(similarity.is_symmetric());
            prop_assert!(distance.is_symmetric());
            for ((i, j), value) in similarity.values().indexed_iter() {
                prop_assert_eq!(distance.values()[(i, j)], 100.0 - value);
            }
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(
        texts in proptest::collection::vec("[a-c ]{3,12}", 1..6)
    ) {
        let engine = MetricEngine::default();
        let labels: Vec<String> = (0..texts.len()).map(|i| format!("t{i}")).collect();
        let sequential = MatrixBuilder::new()
            .with_parallel(false)
            .build(engine.metric_fn(MetricKind::Levenshtein), &texts, &texts, &labels)
            .unwrap();
        let parallel = MatrixBuilder::new()
            .with_parallel(true)
            .build(engine.metric_fn(MetricKind::Levenshtein), &texts, &texts, &labels)
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}
