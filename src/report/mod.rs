//! Report Generators
//!
//! Pure renderers from match results to text artifacts. Rendering the same
//! input twice yields byte-identical output: nothing here reads clocks,
//! environment or hash-order.

pub mod markdown;
pub mod matrix;
pub mod raw;
pub mod text;

use std::fmt;
use std::str::FromStr;

use crate::aggregate::aggregate_by_module;
use crate::error::{ParityError, Result};
use crate::feature::Language;
use crate::matcher::MatchResult;
use crate::metrics::Metrics;

pub use matrix::{compute_matrix, render_matrix, PairwiseMatrix};

/// Separator between language codes in report file names
pub const FILENAME_SEPARATOR: &str = "_";

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    /// Jaccard summary
    Symmetric,
    /// Precision / recall / F1 summary
    Directional,
    /// CSV dump of every feature with its match status
    Raw,
    /// Markdown parity report with module breakdown
    Markdown,
    /// N-way pairwise score matrix
    Matrix,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Symmetric => "symmetric",
            ReportType::Directional => "directional",
            ReportType::Raw => "raw",
            ReportType::Markdown => "md",
            ReportType::Matrix => "matrix",
        }
    }

    /// File extension of the rendered artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ReportType::Raw => "csv",
            _ => "md",
        }
    }

    /// Whether the report compares exactly one registry pair
    pub fn is_pairwise(&self) -> bool {
        !matches!(self, ReportType::Matrix)
    }
}

impl FromStr for ReportType {
    type Err = ParityError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "symmetric" => Ok(ReportType::Symmetric),
            "directional" => Ok(ReportType::Directional),
            "raw" | "csv" => Ok(ReportType::Raw),
            "md" | "markdown" | "parity" => Ok(ReportType::Markdown),
            "matrix" => Ok(ReportType::Matrix),
            _ => Err(ParityError::UnknownReportType(value.to_string())),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name for a report over registries of the given languages, in input order
pub fn output_filename(languages: &[Language], report_type: ReportType) -> String {
    let stem = languages
        .iter()
        .map(|l| l.code())
        .collect::<Vec<_>>()
        .join(FILENAME_SEPARATOR);
    format!("{}.{}", stem, report_type.extension())
}

/// Render a single-pair report
pub fn render_pairwise(
    result: &MatchResult<'_>,
    report_type: ReportType,
    module_depth: Option<usize>,
) -> Result<String> {
    let metrics = Metrics::of(result);
    let rendered = match report_type {
        ReportType::Symmetric => text::render_symmetric(result, &metrics),
        ReportType::Directional => text::render_directional(result, &metrics),
        ReportType::Raw => raw::render_raw(result),
        ReportType::Markdown => {
            let modules = aggregate_by_module(result, module_depth);
            markdown::render_parity(result, &metrics, &modules, module_depth)
        }
        ReportType::Matrix => {
            return Err(ParityError::ReportTypeMode {
                report_type: report_type.to_string(),
                mode: "pairwise",
            })
        }
    };
    Ok(rendered)
}

/// Percentage with two decimals, e.g. `76.92%`
pub(crate) fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Status icon for a module or matrix score
pub(crate) fn status_icon(score: f64) -> &'static str {
    if score >= 1.0 {
        "✅"
    } else if score >= 0.8 {
        "⚠️"
    } else {
        "❌"
    }
}
