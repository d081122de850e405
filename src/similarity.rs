//! Pairwise feature similarity
//!
//! A score in [0, 1] combining three signals with fixed weights:
//!
//! | Signal    | Measure                                        | Default weight |
//! |-----------|------------------------------------------------|----------------|
//! | name      | character LCS ratio of normalized names        | 0.60           |
//! | kind      | exact equality (1 or 0, never blended)         | 0.25           |
//! | namespace | token LCS ratio of normalized namespace paths  | 0.15           |
//!
//! Ratios are `2 * matched / (len_a + len_b)` over an optimal diff, so both
//! measures are symmetric and tolerate differing namespace depth.

use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, get_diff_ratio, Algorithm};

use crate::error::{ParityError, Result};
use crate::feature::Feature;

/// Relative weights of the score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_kind_weight")]
    pub kind: f64,
    #[serde(default = "default_namespace_weight")]
    pub namespace: f64,
}

fn default_name_weight() -> f64 {
    0.60
}

fn default_kind_weight() -> f64 {
    0.25
}

fn default_namespace_weight() -> f64 {
    0.15
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            kind: default_kind_weight(),
            namespace: default_namespace_weight(),
        }
    }
}

impl SimilarityWeights {
    /// Check that every weight is finite and non-negative, and at least one is positive
    pub fn validate(&self) -> Result<()> {
        let weights = [("name", self.name), ("kind", self.kind), ("namespace", self.namespace)];
        for (label, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(ParityError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    label, w
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(ParityError::InvalidWeights("weights sum to zero".to_string()));
        }
        Ok(())
    }

    fn total(&self) -> f64 {
        self.name + self.kind + self.namespace
    }
}

/// Component scores for one feature pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub name: f64,
    pub namespace: f64,
    pub kind: f64,
    pub total: f64,
}

/// Pure scorer over immutable features
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
        }
    }
}

impl SimilarityScorer {
    pub fn new(weights: SimilarityWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Composite similarity of `base` against `target`, in [0, 1]
    pub fn score(&self, base: &Feature, target: &Feature) -> f64 {
        self.breakdown(base, target).total
    }

    pub fn breakdown(&self, base: &Feature, target: &Feature) -> ScoreBreakdown {
        let name = name_similarity(base.normalized_name(), target.normalized_name());
        let namespace =
            namespace_similarity(base.normalized_namespace(), target.normalized_namespace());
        let kind = if base.kind() == target.kind() { 1.0 } else { 0.0 };

        // Exact agreement on every signal is exactly 1, whatever the weights round to
        let total = if name == 1.0 && namespace == 1.0 && kind == 1.0 {
            1.0
        } else {
            let w = &self.weights;
            ((w.name * name + w.namespace * namespace + w.kind * kind) / w.total()).clamp(0.0, 1.0)
        };

        ScoreBreakdown {
            name,
            namespace,
            kind,
            total,
        }
    }
}

/// Character-level similarity of two normalized names
pub fn name_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

/// Token-path similarity of two normalized namespaces
pub fn namespace_similarity(a: &[String], b: &[String]) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    ratio(a, b)
}

fn ratio<T: Eq + Ord + std::hash::Hash>(a: &[T], b: &[T]) -> f64 {
    let ops = capture_diff_slices(Algorithm::Myers, a, b);
    f64::from(get_diff_ratio(&ops, a.len(), b.len())).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureKind, Language};

    fn feature(kind: FeatureKind, name: &str, ns: &[&str]) -> Feature {
        Feature::new(Language::Python, kind, name, ns.iter().copied())
    }

    #[test]
    fn test_identical_canonical_names_score_one() {
        let scorer = SimilarityScorer::default();
        let a = feature(FeatureKind::Function, "get_user", &["pkg", "users"]);
        let b = feature(FeatureKind::Function, "getUser", &["pkg", "users"]);
        assert_eq!(scorer.score(&a, &b), 1.0);
    }

    #[test]
    fn test_kind_term_is_binary() {
        let scorer = SimilarityScorer::default();
        let class = feature(FeatureKind::Class, "User", &[]);
        let function = feature(FeatureKind::Function, "User", &[]);
        let breakdown = scorer.breakdown(&class, &function);
        assert_eq!(breakdown.kind, 0.0);
        assert_eq!(breakdown.name, 1.0);
        assert!((breakdown.total - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_symmetric() {
        let scorer = SimilarityScorer::default();
        let a = feature(FeatureKind::Method, "runAsync", &["google", "adk", "runners"]);
        let b = feature(FeatureKind::Method, "run_live", &["adk", "runner"]);
        assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn test_namespace_depth_tolerance() {
        let deep: Vec<String> = ["google", "adk", "agents"].iter().map(|s| s.to_string()).collect();
        let shallow: Vec<String> = ["adk", "agents"].iter().map(|s| s.to_string()).collect();
        assert!((namespace_similarity(&deep, &shallow) - 0.8).abs() < 1e-6);
        assert_eq!(namespace_similarity(&[], &[]), 1.0);
        assert_eq!(namespace_similarity(&deep, &[]), 0.0);
    }

    #[test]
    fn test_ratio_over_tokens_and_chars() {
        let a: Vec<String> = ["llm", "agent"].iter().map(|s| s.to_string()).collect();
        let b: Vec<String> = ["agent"].iter().map(|s| s.to_string()).collect();
        assert!((ratio(&a, &b) - 2.0 / 3.0).abs() < 1e-6);

        let chars: Vec<char> = "agent".chars().collect();
        assert_eq!(ratio(&chars, &chars), 1.0);
        assert_eq!(ratio::<char>(&[], &[]), 1.0);
    }

    #[test]
    fn test_name_similarity_bounds() {
        assert_eq!(name_similarity("agent", "agent"), 1.0);
        assert_eq!(name_similarity("", "agent"), 0.0);
        assert_eq!(name_similarity("abc", "xyz"), 0.0);
        let partial = name_similarity("run_async", "run_live");
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = SimilarityWeights {
            name: 1.0,
            kind: 0.0,
            namespace: 0.0,
        };
        let scorer = SimilarityScorer::new(weights).unwrap();
        let a = feature(FeatureKind::Class, "Agent", &["a"]);
        let b = feature(FeatureKind::Function, "Agent", &["b"]);
        assert_eq!(scorer.score(&a, &b), 1.0);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let zero = SimilarityWeights {
            name: 0.0,
            kind: 0.0,
            namespace: 0.0,
        };
        assert!(matches!(SimilarityScorer::new(zero), Err(ParityError::InvalidWeights(_))));

        let negative = SimilarityWeights {
            name: -1.0,
            ..SimilarityWeights::default()
        };
        assert!(SimilarityScorer::new(negative).is_err());
    }
}
