//! Optimal Feature Matching
//!
//! Pairs features of a base registry with features of a target registry by
//! solving the assignment problem over the full similarity matrix:
//!
//! 1. Score every (base, target) cell. Cells whose kinds differ are forced to
//!    zero similarity; a cross-kind pair is never accepted.
//! 2. Solve minimum-cost assignment, padding the smaller side with dummy
//!    cells of cost 1. Cells scoring at least `alpha` cost `1 - similarity`
//!    minus a bonus larger than any matching's total; all other cells cost the
//!    same as a dummy. The optimum therefore has the maximum number of pairs
//!    at or above `alpha`, and among those the highest total similarity.
//! 3. Accept assigned pairs scoring at least `alpha`; everything else is
//!    unmatched. The accepted count does not depend on which registry is the
//!    base or on input order.
//! 4. Optionally re-run the assignment over the leftovers at a lower
//!    threshold and record those pairs as near misses. Near misses stay in the
//!    unmatched sets.

pub mod assignment;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::ParityConfig;
use crate::error::{ParityError, Result};
use crate::feature::Feature;
use crate::registry::FeatureRegistry;
use crate::similarity::SimilarityScorer;

use assignment::CostMatrix;

/// Cost of pairing a feature with padding or with a below-threshold counterpart
const DUMMY_COST: f64 = 1.0;

/// An accepted (or near-miss) correspondence between two features
#[derive(Debug, Clone, Copy)]
pub struct MatchedPair<'a> {
    /// Position of `base` in the base registry
    pub base_index: usize,
    /// Position of `target` in the target registry
    pub target_index: usize,
    pub base: &'a Feature,
    pub target: &'a Feature,
    pub score: f64,
}

/// Outcome of one pairwise comparison.
///
/// Every base feature is in exactly one of `matched` / `unmatched_base`, and
/// every target feature in exactly one of `matched` / `unmatched_target`.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    base: &'a FeatureRegistry,
    target: &'a FeatureRegistry,
    alpha: f64,
    matched: Vec<MatchedPair<'a>>,
    unmatched_base: Vec<&'a Feature>,
    unmatched_target: Vec<&'a Feature>,
    near_misses: Vec<MatchedPair<'a>>,
}

/// Match status of a single feature within a result
#[derive(Debug, Clone, Copy)]
pub enum FeatureStatus<'a> {
    Matched { counterpart: &'a Feature, score: f64 },
    NearMiss { counterpart: &'a Feature, score: f64 },
    Unmatched,
}

impl<'a> MatchResult<'a> {
    pub fn base(&self) -> &'a FeatureRegistry {
        self.base
    }

    pub fn target(&self) -> &'a FeatureRegistry {
        self.target
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Accepted pairs, in base registry order
    pub fn matched(&self) -> &[MatchedPair<'a>] {
        &self.matched
    }

    /// Base features without an accepted counterpart, in input order
    pub fn unmatched_base(&self) -> &[&'a Feature] {
        &self.unmatched_base
    }

    /// Target features without an accepted counterpart, in input order
    pub fn unmatched_target(&self) -> &[&'a Feature] {
        &self.unmatched_target
    }

    /// Below-threshold candidates among the unmatched features
    pub fn near_misses(&self) -> &[MatchedPair<'a>] {
        &self.near_misses
    }

    /// Status of every base feature, indexed like the base registry
    pub fn base_statuses(&self) -> Vec<FeatureStatus<'a>> {
        let mut statuses = vec![FeatureStatus::Unmatched; self.base.len()];
        for pair in &self.near_misses {
            statuses[pair.base_index] = FeatureStatus::NearMiss {
                counterpart: pair.target,
                score: pair.score,
            };
        }
        for pair in &self.matched {
            statuses[pair.base_index] = FeatureStatus::Matched {
                counterpart: pair.target,
                score: pair.score,
            };
        }
        statuses
    }

    /// Status of every target feature, indexed like the target registry
    pub fn target_statuses(&self) -> Vec<FeatureStatus<'a>> {
        let mut statuses = vec![FeatureStatus::Unmatched; self.target.len()];
        for pair in &self.near_misses {
            statuses[pair.target_index] = FeatureStatus::NearMiss {
                counterpart: pair.base,
                score: pair.score,
            };
        }
        for pair in &self.matched {
            statuses[pair.target_index] = FeatureStatus::Matched {
                counterpart: pair.base,
                score: pair.score,
            };
        }
        statuses
    }
}

/// Check that a threshold lies in [0, 1]
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(ParityError::InvalidAlpha(alpha))
    }
}

/// Assignment-based matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    scorer: SimilarityScorer,
    near_miss_margin: f64,
    parallel: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(SimilarityScorer::default())
    }
}

/// Indices produced by one assignment round
struct Assignment {
    pairs: Vec<(usize, usize, f64)>,
    base_left: Vec<usize>,
    target_left: Vec<usize>,
}

impl Matcher {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self {
            scorer,
            near_miss_margin: 0.0,
            parallel: true,
        }
    }

    /// Build a matcher from the scoring and matching sections of a config
    pub fn from_config(config: &ParityConfig) -> Result<Self> {
        let scorer = SimilarityScorer::new(config.weights)?;
        Ok(Self::new(scorer)
            .with_near_miss_margin(config.matching.near_miss_margin)
            .with_parallel(config.matching.parallel))
    }

    /// Report leftover pairs within `margin` below alpha as near misses (0 disables)
    pub fn with_near_miss_margin(mut self, margin: f64) -> Self {
        self.near_miss_margin = margin.max(0.0);
        self
    }

    /// Score cost-matrix rows on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Compute the optimal one-to-one matching of `base` against `target`
    pub fn match_registries<'a>(
        &self,
        base: &'a FeatureRegistry,
        target: &'a FeatureRegistry,
        alpha: f64,
    ) -> Result<MatchResult<'a>> {
        validate_alpha(alpha)?;

        if base.is_empty() || target.is_empty() {
            warn!(
                base = %base.language(),
                target = %target.language(),
                base_features = base.len(),
                target_features = target.len(),
                "Empty registry in comparison"
            );
        }

        let base_all: Vec<usize> = (0..base.len()).collect();
        let target_all: Vec<usize> = (0..target.len()).collect();

        let primary = self.assign(base, target, &base_all, &target_all, alpha);

        let near = if self.near_miss_margin > 0.0 {
            let beta = (alpha - self.near_miss_margin).max(0.0);
            self.assign(base, target, &primary.base_left, &primary.target_left, beta)
                .pairs
        } else {
            Vec::new()
        };

        let to_pair = |&(b, t, score): &(usize, usize, f64)| MatchedPair {
            base_index: b,
            target_index: t,
            base: &base.features()[b],
            target: &target.features()[t],
            score,
        };

        let result = MatchResult {
            base,
            target,
            alpha,
            matched: primary.pairs.iter().map(to_pair).collect(),
            unmatched_base: primary.base_left.iter().map(|&i| &base.features()[i]).collect(),
            unmatched_target: primary.target_left.iter().map(|&j| &target.features()[j]).collect(),
            near_misses: near.iter().map(to_pair).collect(),
        };

        info!(
            base = %base.language(),
            target = %target.language(),
            matched = result.matched.len(),
            unmatched_base = result.unmatched_base.len(),
            unmatched_target = result.unmatched_target.len(),
            near_misses = result.near_misses.len(),
            "Matched registries"
        );

        Ok(result)
    }

    /// Solve one assignment round over the given feature subsets
    fn assign(
        &self,
        base: &FeatureRegistry,
        target: &FeatureRegistry,
        base_idx: &[usize],
        target_idx: &[usize],
        threshold: f64,
    ) -> Assignment {
        if base_idx.is_empty() || target_idx.is_empty() {
            return Assignment {
                pairs: Vec::new(),
                base_left: base_idx.to_vec(),
                target_left: target_idx.to_vec(),
            };
        }

        let similarity = self.similarity_rows(base, target, base_idx, target_idx);
        let acceptable = |row: usize, col: usize| {
            let same_kind =
                base.features()[base_idx[row]].kind() == target.features()[target_idx[col]].kind();
            same_kind && similarity[row][col] >= threshold
        };

        let bonus = (base_idx.len().max(target_idx.len()) + 1) as f64;
        let costs = CostMatrix::from_rows(
            (0..base_idx.len())
                .map(|row| {
                    (0..target_idx.len())
                        .map(|col| {
                            if acceptable(row, col) {
                                1.0 - similarity[row][col] - bonus
                            } else {
                                DUMMY_COST
                            }
                        })
                        .collect()
                })
                .collect(),
            target_idx.len(),
        );
        debug!(rows = costs.rows(), cols = costs.cols(), threshold, "Solving assignment");

        let solution = assignment::solve(&costs, DUMMY_COST);

        let mut pairs = Vec::new();
        let mut base_left = Vec::new();
        let mut target_taken = vec![false; target_idx.len()];

        for (row, col) in solution.into_iter().enumerate() {
            match col {
                Some(col) if acceptable(row, col) => {
                    pairs.push((base_idx[row], target_idx[col], similarity[row][col]));
                    target_taken[col] = true;
                }
                _ => base_left.push(base_idx[row]),
            }
        }

        let target_left = target_idx
            .iter()
            .zip(&target_taken)
            .filter(|(_, taken)| !**taken)
            .map(|(&t, _)| t)
            .collect();

        Assignment {
            pairs,
            base_left,
            target_left,
        }
    }

    /// Similarity rows for the subset, with cross-kind cells forced to zero
    fn similarity_rows(
        &self,
        base: &FeatureRegistry,
        target: &FeatureRegistry,
        base_idx: &[usize],
        target_idx: &[usize],
    ) -> Vec<Vec<f64>> {
        let row = |&b: &usize| -> Vec<f64> {
            let bf = &base.features()[b];
            target_idx
                .iter()
                .map(|&t| {
                    let tf = &target.features()[t];
                    if bf.kind() == tf.kind() {
                        self.scorer.score(bf, tf)
                    } else {
                        0.0
                    }
                })
                .collect()
        };

        if self.parallel {
            base_idx.par_iter().map(row).collect()
        } else {
            base_idx.iter().map(row).collect()
        }
    }
}

/// Match two registries with the default scorer and no near-miss pass
pub fn match_registries<'a>(
    base: &'a FeatureRegistry,
    target: &'a FeatureRegistry,
    alpha: f64,
) -> Result<MatchResult<'a>> {
    Matcher::default().match_registries(base, target, alpha)
}
