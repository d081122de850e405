//! Raw CSV report: one row per feature of both registries
//!
//! Rows list the base registry first, then the target registry, each in
//! original input order.

use crate::feature::Feature;
use crate::matcher::{FeatureStatus, MatchResult};

const HEADER: &str = "registry,language,kind,namespace,name,status,counterpart,score";

pub fn render_raw(result: &MatchResult<'_>) -> String {
    let mut lines = vec![HEADER.to_string()];

    let base_rows = result.base().features().iter().zip(result.base_statuses());
    let target_rows = result.target().features().iter().zip(result.target_statuses());

    lines.extend(base_rows.map(|(feature, status)| row("base", feature, status)));
    lines.extend(target_rows.map(|(feature, status)| row("target", feature, status)));

    lines.join("\n") + "\n"
}

fn row(role: &str, feature: &Feature, status: FeatureStatus<'_>) -> String {
    let (status, counterpart, score) = match status {
        FeatureStatus::Matched { counterpart, score } => {
            ("matched", counterpart.qualified_name(), score)
        }
        FeatureStatus::NearMiss { counterpart, score } => {
            ("near_miss", counterpart.qualified_name(), score)
        }
        FeatureStatus::Unmatched => ("unmatched", String::new(), 0.0),
    };

    [
        role.to_string(),
        feature.language().code().to_string(),
        feature.kind().to_string(),
        escape(&feature.namespace_path()),
        escape(&feature.display_name()),
        status.to_string(),
        escape(&counterpart),
        format!("{:.4}", score),
    ]
    .join(",")
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
