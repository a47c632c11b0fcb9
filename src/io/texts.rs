//! Text sources: reading the texts to compare from disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::errors::{RelateError, Result};
use crate::matrix::collection::TextCollection;

/// Ordered list of text files plus optional label overrides.
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    paths: Vec<PathBuf>,
    labels: Option<Vec<String>>,
}

impl TextSource {
    /// Read texts from `paths`, in the given order.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            labels: None,
        }
    }

    /// Use explicit labels instead of file stems.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Files this source reads.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read every file as UTF-8 and pair the texts with their labels.
    pub fn load(&self) -> Result<TextCollection> {
        let texts = self
            .paths
            .iter()
            .map(|path| read_text(path))
            .collect::<Result<Vec<_>>>()?;

        let labels = match &self.labels {
            Some(labels) => labels.clone(),
            None => self.paths.iter().map(|path| label_for(path)).collect(),
        };

        info!(texts = texts.len(), "Loaded texts");
        TextCollection::new(texts, labels)
    }
}

fn read_text(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        RelateError::io(format!("Failed to read text file: {}", path.display()), e)
    })?;
    debug!(path = %path.display(), chars = text.chars().count(), "Read text");
    Ok(text)
}

/// Default label: file stem, falling back to the full path.
fn label_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
