//! Configuration building logic for CLI invocations.
//!
//! Layers, lowest precedence first: built-in defaults, the `--config` YAML
//! file, then explicit command-line flags.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use relate_rs::{MatrixKind, RelateConfig, ShingleConfig, ShingleMode, ShingleProfile};

use crate::cli::args::MetricArgs;

/// Load configuration from an optional file, falling back to defaults.
pub fn load_configuration(path: Option<&Path>) -> anyhow::Result<RelateConfig> {
    match path {
        Some(path) => {
            let config = RelateConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => {
            debug!("No configuration file given, using defaults");
            Ok(RelateConfig::default())
        }
    }
}

/// Build the effective configuration for one command.
pub fn build_relate_config(
    args: &MetricArgs,
    matrix: Option<MatrixKind>,
) -> anyhow::Result<RelateConfig> {
    let mut config = load_configuration(args.config.as_deref())?;
    apply_metric_args(&mut config, args);
    if let Some(matrix) = matrix {
        config.matrix = matrix;
    }
    config.validate()?;
    Ok(config)
}

/// Overlay explicit flags onto `config`.
pub fn apply_metric_args(config: &mut RelateConfig, args: &MetricArgs) {
    if let Some(metric) = args.metric {
        config.metric = metric.into();
    }

    let mode: ShingleMode = args.mode.map_or(config.shingle.mode, Into::into);
    config.shingle = match (args.shingle_length, args.profile) {
        (Some(length), _) => ShingleConfig::new(length, mode),
        (None, Some(profile)) => ShingleConfig::for_profile(ShingleProfile::from(profile), mode),
        (None, None) => ShingleConfig::new(config.shingle.length, mode),
    };

    if let Some(ignore) = &args.ignore {
        let mut characters: Vec<char> = ignore.chars().collect();
        characters.sort_unstable();
        characters.dedup();
        config.ignore_characters = characters;
    }

    if args.sequential {
        config.parallel = false;
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use relate_rs::MetricKind;

    use super::*;
    use crate::cli::args::{MetricArg, ModeArg, ProfileArg};

    #[test]
    fn flags_override_defaults() {
        let args = MetricArgs {
            metric: Some(MetricArg::Overlap),
            shingle_length: NonZeroUsize::new(2),
            mode: Some(ModeArg::Words),
            ignore: Some("--_".to_string()),
            sequential: true,
            ..MetricArgs::default()
        };

        let config = build_relate_config(&args, Some(MatrixKind::Distance)).unwrap();
        assert_eq!(config.metric, MetricKind::Overlap);
        assert_eq!(config.matrix, MatrixKind::Distance);
        assert_eq!(config.shingle.length.get(), 2);
        assert_eq!(config.shingle.mode, ShingleMode::Words);
        assert_eq!(config.ignore_characters, vec!['-', '_']);
        assert!(!config.parallel);
    }

    #[test]
    fn profile_applies_when_length_missing() {
        let args = MetricArgs {
            mode: Some(ModeArg::Words),
            profile: Some(ProfileArg::Fine),
            ..MetricArgs::default()
        };
        let config = build_relate_config(&args, None).unwrap();
        assert_eq!(config.shingle.length.get(), 2);

        let args = MetricArgs {
            shingle_length: NonZeroUsize::new(5),
            profile: Some(ProfileArg::Fine),
            ..MetricArgs::default()
        };
        let config = build_relate_config(&args, None).unwrap();
        assert_eq!(config.shingle.length.get(), 5);
    }

    #[test]
    fn file_values_survive_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relate.yml");
        std::fs::write(&path, "metric: hamming\nmatrix: st_similarity\n").unwrap();

        let args = MetricArgs {
            config: Some(path),
            ..MetricArgs::default()
        };
        let config = build_relate_config(&args, None).unwrap();
        assert_eq!(config.metric, MetricKind::Hamming);
        assert_eq!(config.matrix, MatrixKind::StandardizedSimilarity);
    }
}
