//! Matrix and pairwise scoring commands.

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::info;

use relate_rs::io::reports::ReportFormat;
use relate_rs::io::texts::TextSource;
use relate_rs::RelateEngine;

use crate::cli::args::{CompareArgs, ScoreArgs};
use crate::cli::config_builder::build_relate_config;

/// Build the configured matrix over the given files and print or save it.
pub fn compare_command(args: CompareArgs) -> anyhow::Result<()> {
    let config = build_relate_config(&args.metric, args.matrix.map(Into::into))?;
    let engine = RelateEngine::new(config)?;

    let mut source = TextSource::from_paths(&args.files);
    if let Some(labels) = args.labels {
        source = source.with_labels(labels);
    }
    let collection = source.load()?;

    let format = ReportFormat::from(args.format);
    let report = engine.report(&collection)?;
    let rendered = report.render(format)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), %format, "Report written");
        }
        None => {
            if format == ReportFormat::Table {
                println!(
                    "{}",
                    format!(
                        "# {} {} ({} texts)",
                        report.metric,
                        report.matrix,
                        report.labels.len()
                    )
                    .dimmed()
                );
            }
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Score two literal strings with the configured metric.
pub fn score_command(args: ScoreArgs) -> anyhow::Result<()> {
    let config = build_relate_config(&args.metric, None)?;
    let engine = RelateEngine::new(config)?;

    let score = engine
        .compare(&args.a, &args.b)
        .with_context(|| format!("Failed to score {:?} against {:?}", args.a, args.b))?;
    println!("{:.6}", score);

    Ok(())
}
