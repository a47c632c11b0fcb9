//! Rendering labelled matrices for people and for other tools.
//!
//! The similarity core only produces numbers; this module turns a
//! [`LabeledMatrix`] into a text table, JSON, YAML or CSV.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::core::errors::{RelateError, Result};
use crate::matrix::builder::{LabeledMatrix, MatrixKind};
use crate::similarity::metrics::{MetricKind, SCORE_PRECISION};

/// Output formats for matrix reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV with a header row of labels
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(RelateError::validation_field(
                "unsupported report format",
                "format",
                other,
            )),
        }
    }
}

/// Serializable view of a computed matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixReport {
    /// Metric that produced the pairwise scores
    pub metric: MetricKind,
    /// Matrix kind
    pub matrix: MatrixKind,
    /// Row and column labels
    pub labels: Vec<String>,
    /// Cell values, one vector per row
    pub rows: Vec<Vec<f64>>,
}

impl MatrixReport {
    /// Capture `matrix` together with how it was computed.
    pub fn new(metric: MetricKind, kind: MatrixKind, matrix: &LabeledMatrix) -> Self {
        Self {
            metric,
            matrix: kind,
            labels: matrix.labels().to_vec(),
            rows: matrix.to_rows(),
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Table => Ok(self.to_table()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            ReportFormat::Csv => self.to_csv(),
        }
    }

    /// Rounded table with a label column and a header of labels.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();

        let mut header = Vec::with_capacity(self.labels.len() + 1);
        header.push(String::new());
        header.extend(self.labels.iter().cloned());
        builder.push_record(header);

        for (label, row) in self.labels.iter().zip(&self.rows) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(label.clone());
            record.extend(row.iter().map(|value| format_cell(*value)));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// CSV with an empty leading header cell, then one record per label.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        let header = std::iter::once("").chain(self.labels.iter().map(String::as_str));
        writer.write_record(header).map_err(csv_error)?;

        for (label, row) in self.labels.iter().zip(&self.rows) {
            let record = std::iter::once(label.clone()).chain(row.iter().map(|v| format_cell(*v)));
            writer.write_record(record).map_err(csv_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| RelateError::Serialization {
                message: format!("CSV flush failed: {e}"),
                data_type: Some("CSV".to_string()),
                source: None,
            })?;
        String::from_utf8(bytes).map_err(|e| RelateError::Serialization {
            message: format!("CSV output is not UTF-8: {e}"),
            data_type: Some("CSV".to_string()),
            source: Some(Box::new(e)),
        })
    }
}

fn format_cell(value: f64) -> String {
    format!("{value:.prec$}", prec = SCORE_PRECISION as usize)
}

fn csv_error(err: csv::Error) -> RelateError {
    RelateError::Serialization {
        message: format!("CSV serialization failed: {err}"),
        data_type: Some("CSV".to_string()),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn sample_report() -> MatrixReport {
        let matrix = LabeledMatrix::new(
            vec!["text_1".to_string(), "text, two".to_string()],
            array![[100.0, 57.142857], [57.142857, 100.0]],
        )
        .unwrap();
        MatrixReport::new(MetricKind::Levenshtein, MatrixKind::Similarity, &matrix)
    }

    #[test]
    fn test_table_contains_labels_and_six_digit_values() {
        let table = sample_report().to_table();
        assert!(table.contains("text_1"));
        assert!(table.contains("text, two"));
        assert!(table.contains("57.142857"));
        assert!(table.contains("100.000000"));
    }

    #[test]
    fn test_csv_quotes_labels_with_commas() {
        let csv = sample_report().to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(",text_1,\"text, two\""));
        assert_eq!(lines.next(), Some("text_1,100.000000,57.142857"));
        assert_eq!(lines.next(), Some("\"text, two\",57.142857,100.000000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_json_report() {
        let json = sample_report().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metric"], "levenshtein");
        assert_eq!(value["matrix"], "similarity");
        assert_eq!(value["labels"][1], "text, two");
        assert_eq!(value["rows"][0][1], 57.142857);
    }

    #[test]
    fn test_yaml_report_parses_back() {
        let yaml = sample_report().render(ReportFormat::Yaml).unwrap();
        let parsed: MatrixReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.labels.len(), 2);
        assert_eq!(parsed.matrix, MatrixKind::Similarity);
    }

    #[test]
    fn test_format_names() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("YML".parse::<ReportFormat>().unwrap(), ReportFormat::Yaml);
        assert!("html".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Csv.to_string(), "csv");
    }
}
