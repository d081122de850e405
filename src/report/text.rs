//! Symmetric and directional metric summaries

use crate::matcher::MatchResult;
use crate::metrics::Metrics;

use super::percent;

/// Jaccard summary of a registry pair
pub fn render_symmetric(result: &MatchResult<'_>, metrics: &Metrics) -> String {
    let base = result.base().language().display_name();
    let target = result.target().language().display_name();
    let counts = &metrics.counts;

    let lines = [
        format!("# Symmetric Parity: {} / {}", base, target),
        String::new(),
        format!("Similarity threshold (alpha): {:.2}", result.alpha()),
        String::new(),
        "| Metric | Value |".to_string(),
        "| :--- | :--- |".to_string(),
        format!("| Shared features | {} |", counts.matched),
        format!("| Exclusive to {} | {} |", base, counts.unmatched_base),
        format!("| Exclusive to {} | {} |", target, counts.unmatched_target),
        format!(
            "| Jaccard score | {} ({} / {}) |",
            percent(metrics.symmetric),
            counts.matched,
            counts.union()
        ),
    ];

    lines.join("\n") + "\n"
}

/// Precision / recall summary treating the base registry as ground truth
pub fn render_directional(result: &MatchResult<'_>, metrics: &Metrics) -> String {
    let base = result.base().language().display_name();
    let target = result.target().language().display_name();
    let counts = &metrics.counts;

    let lines = [
        format!("# Directional Parity: {} against {}", target, base),
        String::new(),
        format!("Similarity threshold (alpha): {:.2}", result.alpha()),
        String::new(),
        "| Role | Language | Features |".to_string(),
        "| :--- | :--- | :--- |".to_string(),
        format!("| **Base** (ground truth) | {} | {} |", base, counts.base_total()),
        format!("| **Target** | {} | {} |", target, counts.target_total()),
        String::new(),
        "| Metric | Value | Details |".to_string(),
        "| :--- | :--- | :--- |".to_string(),
        format!(
            "| Precision | {:.4} | {} of {} {} features have a {} counterpart |",
            metrics.precision,
            counts.matched,
            counts.target_total(),
            target,
            base
        ),
        format!(
            "| Recall | {:.4} | {} of {} {} features are implemented in {} |",
            metrics.recall,
            counts.matched,
            counts.base_total(),
            base,
            target
        ),
        format!("| F1 | {:.4} | Harmonic mean of precision and recall |", metrics.f1),
    ];

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, FeatureKind, Language};
    use crate::matcher::match_registries;
    use crate::registry::FeatureRegistry;

    fn registries() -> (FeatureRegistry, FeatureRegistry) {
        let base = FeatureRegistry::new(
            Language::Python,
            vec![
                Feature::new(Language::Python, FeatureKind::Function, "run", ["runners"]),
                Feature::new(Language::Python, FeatureKind::Function, "close", ["runners"]),
            ],
        )
        .unwrap();
        let target = FeatureRegistry::new(
            Language::Go,
            vec![Feature::new(Language::Go, FeatureKind::Function, "Run", ["runners"])],
        )
        .unwrap();
        (base, target)
    }

    #[test]
    fn test_symmetric_summary() {
        let (base, target) = registries();
        let result = match_registries(&base, &target, 0.8).unwrap();
        let out = render_symmetric(&result, &Metrics::of(&result));

        assert!(out.starts_with("# Symmetric Parity: Python / Go\n"));
        assert!(out.contains("| Shared features | 1 |"));
        assert!(out.contains("| Exclusive to Python | 1 |"));
        assert!(out.contains("| Exclusive to Go | 0 |"));
        assert!(out.contains("| Jaccard score | 50.00% (1 / 2) |"));
    }

    #[test]
    fn test_directional_summary() {
        let (base, target) = registries();
        let result = match_registries(&base, &target, 0.8).unwrap();
        let out = render_directional(&result, &Metrics::of(&result));

        assert!(out.contains("| Precision | 1.0000 |"));
        assert!(out.contains("| Recall | 0.5000 |"));
        assert!(out.contains("| F1 | 0.6667 |"));
    }
}
