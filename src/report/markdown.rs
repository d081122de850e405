//! Markdown parity report
//!
//! Layout:
//! - header table (role, language, version)
//! - summary table (shared, exclusive to each side, Jaccard score)
//! - module summary, sorted by score then module name
//! - one detail section per module: solid matches, near misses, unmatched

use std::collections::BTreeMap;

use crate::aggregate::{ModuleBreakdown, ModuleMap};
use crate::feature::Feature;
use crate::matcher::{MatchResult, MatchedPair};
use crate::metrics::Metrics;

use super::{percent, status_icon};

/// Features of one module, bucketed by match outcome
#[derive(Default)]
struct ModuleEntries<'r, 'a> {
    solid: Vec<&'r MatchedPair<'a>>,
    near: Vec<&'r MatchedPair<'a>>,
    missing_in_target: Vec<&'a Feature>,
    missing_in_base: Vec<&'a Feature>,
}

fn pair_order(a: &&MatchedPair<'_>, b: &&MatchedPair<'_>) -> std::cmp::Ordering {
    (a.base.kind().report_priority(), a.base.normalized_name(), a.base_index).cmp(&(
        b.base.kind().report_priority(),
        b.base.normalized_name(),
        b.base_index,
    ))
}

pub fn render_parity(
    result: &MatchResult<'_>,
    metrics: &Metrics,
    modules: &BTreeMap<String, ModuleBreakdown>,
    module_depth: Option<usize>,
) -> String {
    let base_registry = result.base();
    let target_registry = result.target();
    let base = base_registry.language().display_name();
    let target = target_registry.language().display_name();
    let counts = &metrics.counts;

    let mut lines = vec![
        "# Feature Matching Parity Report".to_string(),
        String::new(),
        "| Role | Language | Version |".to_string(),
        "| :--- | :--- | :--- |".to_string(),
        format!("| **Base** | {} | {} |", base, base_registry.version().unwrap_or("-")),
        format!("| **Target** | {} | {} |", target, target_registry.version().unwrap_or("-")),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        "| Feature Category | Count | Details |".to_string(),
        "| :--- | :--- | :--- |".to_string(),
        format!("| **✅ Common Shared** | **{}** | Implemented in both SDKs |", counts.matched),
        format!(
            "| **📦 Exclusive to `{}`** | **{}** | Requires implementation in `{}` |",
            base, counts.unmatched_base, target
        ),
        format!(
            "| **📦 Exclusive to `{}`** | **{}** | Requires implementation in `{}` |",
            target, counts.unmatched_target, base
        ),
        format!(
            "| **📊 Jaccard Score** | **{}** | Overall Parity ({} / {}) |",
            percent(metrics.symmetric),
            counts.matched,
            counts.union()
        ),
        String::new(),
    ];

    if modules.is_empty() {
        lines.push("_No features in either registry._".to_string());
        return lines.join("\n") + "\n";
    }

    // Module summary, best parity first
    let mut ranked: Vec<(&String, &ModuleBreakdown)> = modules.iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| {
        b.score.total_cmp(&a.score).then_with(|| a_name.cmp(b_name))
    });

    lines.push("## Module Summary".to_string());
    lines.push(String::new());
    lines.push(format!(
        "| Module | Shared | {} Only | {} Only | Score | Status |",
        base, target
    ));
    lines.push("|---|---|---|---|---|---|".to_string());
    for (module, breakdown) in &ranked {
        lines.push(format!(
            "| `{}` | {} | {} | {} | {} | {} |",
            module,
            breakdown.matched(),
            breakdown.unmatched_base(),
            breakdown.unmatched_target(),
            percent(breakdown.score),
            status_icon(breakdown.score)
        ));
    }
    lines.push(String::new());

    // Bucket entries per module
    let module_map = ModuleMap::new(result, module_depth);
    let mut entries: BTreeMap<String, ModuleEntries<'_, '_>> = BTreeMap::new();
    for pair in result.matched() {
        entries.entry(module_map.base_module(pair.base)).or_default().solid.push(pair);
    }
    for pair in result.near_misses() {
        entries.entry(module_map.base_module(pair.base)).or_default().near.push(pair);
    }
    for &feature in result.unmatched_base() {
        entries
            .entry(module_map.base_module(feature))
            .or_default()
            .missing_in_target
            .push(feature);
    }
    for &feature in result.unmatched_target() {
        entries
            .entry(module_map.target_module(feature))
            .or_default()
            .missing_in_base
            .push(feature);
    }

    lines.push("## Module Details".to_string());

    for (module, breakdown) in modules {
        let Some(module_entries) = entries.get_mut(module) else {
            continue;
        };
        module_entries.solid.sort_by(pair_order);
        module_entries.near.sort_by(pair_order);

        lines.push(String::new());
        lines.push(format!("### Module: `{}`", module));
        lines.push(String::new());
        lines.push(format!(
            "**Score:** {} ({})",
            percent(breakdown.score),
            status_icon(breakdown.score)
        ));
        lines.push(String::new());
        lines.push(format!("**Features:** {}", breakdown.counts.union()));

        if !module_entries.solid.is_empty() {
            lines.push(String::new());
            lines.push("#### ✅ Solid Features".to_string());
            lines.push(String::new());
            lines.push(format!(
                "| Type | {} Feature | {} Feature | Similarity Score |",
                base, target
            ));
            lines.push("|---|---|---|---|".to_string());
            lines.extend(module_entries.solid.iter().map(|pair| pair_row(pair)));
        }

        if !module_entries.near.is_empty() {
            lines.push(String::new());
            lines.push("#### ⚠️ Potential Matches".to_string());
            lines.push(String::new());
            lines.push(format!(
                "| Type | {} Feature | Closest {} Candidate | Similarity |",
                base, target
            ));
            lines.push("|---|---|---|---|".to_string());
            lines.extend(module_entries.near.iter().map(|pair| pair_row(pair)));
        }

        if !module_entries.missing_in_target.is_empty()
            || !module_entries.missing_in_base.is_empty()
        {
            lines.push(String::new());
            lines.push("#### ❌ Unmatched Features".to_string());
            lines.push(String::new());
            lines.push("| Type | Missing Feature | Missing In |".to_string());
            lines.push("|---|---|---|".to_string());
            lines.extend(
                module_entries
                    .missing_in_target
                    .iter()
                    .map(|f| missing_row(f, target)),
            );
            lines.extend(
                module_entries
                    .missing_in_base
                    .iter()
                    .map(|f| missing_row(f, base)),
            );
        }
    }

    lines.join("\n") + "\n"
}

fn pair_row(pair: &MatchedPair<'_>) -> String {
    format!(
        "| {} | `{}` | `{}` | {:.2} |",
        pair.base.kind(),
        pair.base.display_name(),
        pair.target.display_name(),
        pair.score
    )
}

fn missing_row(feature: &Feature, missing_in: &str) -> String {
    format!("| {} | `{}` | {} |", feature.kind(), feature.display_name(), missing_in)
}
