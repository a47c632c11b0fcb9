//! Ordered texts paired with unique display labels.

use indexmap::IndexSet;
use serde::Serialize;

use crate::core::errors::{RelateError, Result};

/// Texts and their labels; row/column `i` of every matrix refers to entry `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextCollection {
    texts: Vec<String>,
    labels: Vec<String>,
}

impl TextCollection {
    /// Pair `texts` with `labels`.
    ///
    /// Fails with `ShapeMismatch` when the counts differ and with `Validation`
    /// when a label repeats.
    pub fn new(texts: Vec<String>, labels: Vec<String>) -> Result<Self> {
        if texts.len() != labels.len() {
            return Err(RelateError::shape_mismatch(
                "label count must match text count",
                texts.len(),
                labels.len(),
            ));
        }

        let mut seen = IndexSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(RelateError::validation_field(
                    "labels must be unique",
                    "labels",
                    label.clone(),
                ));
            }
        }

        Ok(Self { texts, labels })
    }

    /// Label texts `text_1`, `text_2`, ... in order.
    pub fn with_default_labels(texts: Vec<String>) -> Self {
        let labels = (1..=texts.len()).map(|i| format!("text_{i}")).collect();
        Self { texts, labels }
    }

    /// Number of texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the collection holds no texts.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Texts in order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `(label, text)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.texts.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_collection() {
        let collection =
            TextCollection::new(strings(&["alpha", "beta"]), strings(&["a", "b"])).unwrap();
        assert_eq!(collection.len(), 2);
        assert!(!collection.is_empty());
        assert_eq!(
            collection.iter().collect::<Vec<_>>(),
            vec![("a", "alpha"), ("b", "beta")]
        );
    }

    #[test]
    fn test_label_count_mismatch() {
        let err = TextCollection::new(strings(&["alpha", "beta"]), strings(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            RelateError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = TextCollection::new(strings(&["x", "y", "z"]), strings(&["a", "b", "a"]))
            .unwrap_err();
        if let RelateError::Validation { actual, .. } = err {
            assert_eq!(actual.as_deref(), Some("a"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_default_labels() {
        let collection = TextCollection::with_default_labels(strings(&["x", "y", "z"]));
        assert_eq!(collection.labels(), &["text_1", "text_2", "text_3"]);
        assert_eq!(collection.texts(), &["x", "y", "z"]);
    }
}
