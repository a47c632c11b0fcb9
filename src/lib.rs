//! # Relate-RS: Pairwise Text Similarity Matrices
//!
//! Compares every text in a small collection against every other one and
//! assembles the scores into square, labelled matrices:
//!
//! - **Shingling**: overlapping character or word windows of a fixed length
//! - **Set metrics**: Jaccard, Sørensen–Dice and Overlap over shingle sets
//! - **Sequence metrics**: Hamming and Levenshtein over raw characters
//! - **Matrices**: similarity, distance, and z-score standardized variants
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  API Layer                    │
//! ├───────────────────────────────────────────────┤
//! │  Matrix Builder  │  Metric Engine  │   I/O    │
//! │                  │                 │          │
//! │ • Similarity     │ • Jaccard       │ • Texts  │
//! │ • Distance       │ • Sørensen–Dice │ • Tables │
//! │ • Standardized   │ • Overlap       │ • JSON   │
//! │                  │ • Hamming       │ • CSV    │
//! │                  │ • Levenshtein   │          │
//! │                  │      ↓          │          │
//! │                  │   Shingler      │          │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use relate_rs::{MatrixKind, MetricKind, RelateConfig, RelateEngine, TextCollection};
//!
//! # fn main() -> relate_rs::Result<()> {
//! let config = RelateConfig {
//!     metric: MetricKind::Levenshtein,
//!     matrix: MatrixKind::Distance,
//!     ..RelateConfig::default()
//! };
//! let engine = RelateEngine::new(config)?;
//!
//! let texts = TextCollection::with_default_labels(vec![
//!     "kitten".to_string(),
//!     "sitting".to_string(),
//! ]);
//! let matrix = engine.compute(&texts)?;
//! assert_eq!(matrix.get(0, 0), Some(0.0));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Configuration and error handling
pub mod core {
    //! Configuration and error types shared by every layer.

    pub mod config;
    pub mod errors;
}

// Tokenization and pairwise metrics
pub mod similarity {
    //! Shingle tokenization and string similarity metrics.

    pub mod metrics;
    pub mod shingle;
}

// Matrix assembly and standardization
pub mod matrix {
    //! Pairwise matrix assembly over a labelled text collection.

    pub mod builder;
    pub mod collection;
    pub mod stats;
}

// Text sources and report rendering
pub mod io {
    //! Reading texts and rendering matrices.

    pub mod reports;
    pub mod texts;
}

// Public API and engine interface
pub mod api {
    //! High-level engine interface.

    pub mod engine;
}

// Re-export primary types for convenience
pub use api::engine::RelateEngine;
pub use core::config::RelateConfig;
pub use core::errors::{RelateError, Result, ResultExt};
pub use matrix::builder::{LabeledMatrix, MatrixBuilder, MatrixKind};
pub use matrix::collection::TextCollection;
pub use similarity::metrics::{MetricEngine, MetricKind};
pub use similarity::shingle::{ShingleConfig, ShingleMode, ShingleProfile, Shingler};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build-time feature detection
pub mod features {
    //! Runtime feature detection.

    /// Check if row-parallel matrix computation is compiled in
    pub const fn has_parallel() -> bool {
        cfg!(feature = "parallel")
    }
}
