//! Configuration management commands.
//!
//! Printing defaults, validating configuration files and listing the
//! available metrics and matrix kinds.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use relate_rs::{MatrixKind, MetricKind, RelateConfig};

use crate::cli::args::ValidateConfigArgs;
use crate::cli::config_builder::load_configuration;

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default relate configuration".dimmed());
    println!(
        "{}",
        "# Save this to a file and customize as needed".dimmed()
    );
    println!(
        "{}",
        "# Usage: relate compare --config your-config.yml <files>".dimmed()
    );
    println!();

    let config = RelateConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Validate a relate configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(args.config.as_path())) {
        Ok(config) => {
            println!("{}", "Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "Configuration validation failed:".red(), e);
            println!();
            println!(
                "{}",
                "Tip: Use 'relate print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {:#}", e));
        }
    };

    println!("   Metric: {}", config.metric.to_string().cyan());
    println!("   Matrix: {}", config.matrix.to_string().cyan());
    println!(
        "   Shingles: {} x {}",
        config.shingle.length,
        config.shingle.mode
    );

    if args.detailed {
        println!();
        println!("{}", "Detailed Settings".bright_blue().bold());
        println!();

        /// Row used when printing detailed configuration values.
        #[derive(Tabled)]
        struct DetailRow {
            setting: String,
            value: String,
        }

        let ignore: String = config.ignore_characters.iter().collect();
        let detail_rows = vec![
            DetailRow {
                setting: "shingle.length".to_string(),
                value: config.shingle.length.to_string(),
            },
            DetailRow {
                setting: "shingle.mode".to_string(),
                value: config.shingle.mode.to_string(),
            },
            DetailRow {
                setting: "metric".to_string(),
                value: config.metric.to_string(),
            },
            DetailRow {
                setting: "matrix".to_string(),
                value: config.matrix.to_string(),
            },
            DetailRow {
                setting: "ignore_characters".to_string(),
                value: format!("{:?}", ignore),
            },
            DetailRow {
                setting: "parallel".to_string(),
                value: config.parallel.to_string(),
            },
        ];

        let mut table = Table::new(detail_rows);
        table.with(TableStyle::rounded());
        println!("{}", table);
    }

    Ok(())
}

/// List supported metrics and matrix kinds
pub fn list_metrics() -> anyhow::Result<()> {
    /// Row type for the metric listing.
    #[derive(Tabled)]
    struct MetricRow {
        #[tabled(rename = "Metric")]
        name: String,
        #[tabled(rename = "Input")]
        input: String,
        #[tabled(rename = "Description")]
        description: String,
    }

    let rows: Vec<MetricRow> = MetricKind::ALL
        .iter()
        .map(|kind| MetricRow {
            name: kind.as_str().to_string(),
            input: if kind.uses_shingles() {
                "shingle set".to_string()
            } else {
                "characters".to_string()
            },
            description: kind.description().to_string(),
        })
        .collect();

    println!("{}", "Metrics".bright_blue().bold());
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();

    println!("{}", "Matrix kinds".bright_blue().bold());
    for kind in MatrixKind::ALL {
        println!("   {}", kind.as_str());
    }

    Ok(())
}
