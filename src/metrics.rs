//! Parity metrics over a match result
//!
//! - **Symmetric** (Jaccard): `matched / (matched + unmatched_base + unmatched_target)`.
//!   Two empty registries are identical by convention: the score is 1.
//! - **Directional**: the base registry is ground truth and the target is the
//!   subject. `precision = matched / |target|`, `recall = matched / |base|`.
//!   An empty denominator yields 0, and F1 is 0 when precision and recall are both 0.

use serde::Serialize;

use crate::matcher::MatchResult;

/// Raw counts behind every metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MatchCounts {
    pub matched: usize,
    pub unmatched_base: usize,
    pub unmatched_target: usize,
}

impl MatchCounts {
    pub fn of(result: &MatchResult<'_>) -> Self {
        Self {
            matched: result.matched().len(),
            unmatched_base: result.unmatched_base().len(),
            unmatched_target: result.unmatched_target().len(),
        }
    }

    pub fn base_total(&self) -> usize {
        self.matched + self.unmatched_base
    }

    pub fn target_total(&self) -> usize {
        self.matched + self.unmatched_target
    }

    /// Size of the union of both feature sets under the matching
    pub fn union(&self) -> usize {
        self.matched + self.unmatched_base + self.unmatched_target
    }

    pub fn symmetric(&self) -> f64 {
        ratio_or(self.matched, self.union(), 1.0)
    }

    pub fn precision(&self) -> f64 {
        ratio_or(self.matched, self.target_total(), 0.0)
    }

    pub fn recall(&self) -> f64 {
        ratio_or(self.matched, self.base_total(), 0.0)
    }
}

/// Every score derived from one match result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub counts: MatchCounts,
    pub symmetric: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Metrics {
    pub fn from_counts(counts: MatchCounts) -> Self {
        let precision = counts.precision();
        let recall = counts.recall();
        Self {
            counts,
            symmetric: counts.symmetric(),
            precision,
            recall,
            f1: f1(precision, recall),
        }
    }

    pub fn of(result: &MatchResult<'_>) -> Self {
        Self::from_counts(MatchCounts::of(result))
    }
}

/// Jaccard-style symmetric score of a match result
pub fn symmetric_score(result: &MatchResult<'_>) -> f64 {
    MatchCounts::of(result).symmetric()
}

pub fn precision(result: &MatchResult<'_>) -> f64 {
    MatchCounts::of(result).precision()
}

pub fn recall(result: &MatchResult<'_>) -> f64 {
    MatchCounts::of(result).recall()
}

/// Harmonic mean of precision and recall
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn ratio_or(numerator: usize, denominator: usize, empty: f64) -> f64 {
    if denominator == 0 {
        empty
    } else {
        numerator as f64 / denominator as f64
    }
}
