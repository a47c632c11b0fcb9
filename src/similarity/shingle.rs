//! Shingle tokenization for set-based similarity metrics.
//!
//! A text is cut into overlapping fixed-size windows, either of characters or
//! of whitespace-separated words. Set-based metrics compare the distinct
//! shingles of two texts, so tokenization policy lives here and nowhere else.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::errors::{RelateError, Result};

/// Unit a shingle window is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShingleMode {
    /// Windows of `k` consecutive characters
    #[default]
    Characters,
    /// Windows of `k` consecutive whitespace-separated words, joined by one space
    Words,
}

impl ShingleMode {
    /// Stable lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Words => "words",
        }
    }
}

impl fmt::Display for ShingleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShingleMode {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" | "chars" | "letters" => Ok(Self::Characters),
            "words" => Ok(Self::Words),
            other => Err(RelateError::validation_field(
                "shingle mode must be 'characters' or 'words'",
                "shingle.mode",
                other,
            )),
        }
    }
}

/// Preset shingle lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShingleProfile {
    /// Short windows: 3 characters or 2 words
    Fine,
    /// Long windows: 4 characters or 3 words
    Coarse,
}

impl ShingleProfile {
    /// Shingle length this profile uses for the given mode.
    pub fn length_for(self, mode: ShingleMode) -> NonZeroUsize {
        let k = match (self, mode) {
            (Self::Fine, ShingleMode::Characters) => 3,
            (Self::Fine, ShingleMode::Words) => 2,
            (Self::Coarse, ShingleMode::Characters) => 4,
            (Self::Coarse, ShingleMode::Words) => 3,
        };
        NonZeroUsize::new(k).unwrap_or(NonZeroUsize::MIN)
    }
}

/// Tokenization policy shared by every set-based metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShingleConfig {
    /// Window size `k`
    pub length: NonZeroUsize,

    /// Whether windows count characters or words
    #[serde(default)]
    pub mode: ShingleMode,
}

impl Default for ShingleConfig {
    fn default() -> Self {
        Self::for_profile(ShingleProfile::Coarse, ShingleMode::Characters)
    }
}

impl ShingleConfig {
    /// Create a config with an explicit window size.
    pub fn new(length: NonZeroUsize, mode: ShingleMode) -> Self {
        Self { length, mode }
    }

    /// Create a config from a preset profile.
    pub fn for_profile(profile: ShingleProfile, mode: ShingleMode) -> Self {
        Self {
            length: profile.length_for(mode),
            mode,
        }
    }

    /// Build a config from a raw length, rejecting zero.
    pub fn try_new(length: usize, mode: ShingleMode) -> Result<Self> {
        let length = NonZeroUsize::new(length).ok_or_else(|| {
            RelateError::validation_field(
                "shingle length must be greater than 0",
                "shingle.length",
                "0",
            )
        })?;
        Ok(Self { length, mode })
    }
}

/// Cut `text` into overlapping shingles of `length` units.
///
/// Returns an empty sequence when the text holds fewer than `length` units.
/// Character mode counts Unicode scalar values, not bytes.
pub fn tokenize(text: &str, length: NonZeroUsize, mode: ShingleMode) -> Vec<String> {
    let k = length.get();
    match mode {
        ShingleMode::Characters => {
            let chars: Vec<char> = text.chars().collect();
            chars
                .windows(k)
                .map(|window| window.iter().collect())
                .collect()
        }
        ShingleMode::Words => {
            let words: Vec<&str> = text.split_whitespace().collect();
            words.windows(k).map(|window| window.join(" ")).collect()
        }
    }
}

/// Stateless tokenizer bound to one [`ShingleConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Shingler {
    config: ShingleConfig,
}

impl Shingler {
    /// Create a shingler for the given policy.
    pub fn new(config: ShingleConfig) -> Self {
        Self { config }
    }

    /// Policy this shingler applies.
    pub fn config(&self) -> &ShingleConfig {
        &self.config
    }

    /// Ordered shingle sequence, duplicates kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, self.config.length, self.config.mode)
    }

    /// Distinct shingles of `text`.
    pub fn token_set(&self, text: &str) -> AHashSet<String> {
        self.tokenize(text).into_iter().collect()
    }
}
