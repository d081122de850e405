//! Per-module parity breakdown
//!
//! Groups a match result by namespace prefix. The prefix is the first `depth`
//! namespace segments joined with '.', or the whole namespace when no depth is
//! given. Segments are normalized one key each, so `llm_agent` stays a single
//! module rather than splitting into words.
//!
//! Matched pairs are filed under the base feature. A target module with no
//! base module of the same name is filed under the closest base module when
//! their segment similarity reaches [`NAMESPACE_REMAP_THRESHOLD`], so
//! `adk.runners` lines up with `google.adk.runners`.

use std::collections::{BTreeMap, BTreeSet};

use crate::feature::Feature;
use crate::matcher::MatchResult;
use crate::metrics::MatchCounts;
use crate::similarity::namespace_similarity;

/// Group key for features with an empty namespace
pub const ROOT_MODULE: &str = "(root)";

/// Minimum segment similarity for filing a target module under a base module
pub const NAMESPACE_REMAP_THRESHOLD: f64 = 0.8;

/// Rollup for one namespace prefix
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModuleBreakdown {
    pub counts: MatchCounts,
    pub score: f64,
}

impl ModuleBreakdown {
    pub fn matched(&self) -> usize {
        self.counts.matched
    }

    pub fn unmatched_base(&self) -> usize {
        self.counts.unmatched_base
    }

    pub fn unmatched_target(&self) -> usize {
        self.counts.unmatched_target
    }
}

/// Namespace prefix a feature is grouped under, before any remapping
pub fn module_key(feature: &Feature, depth: Option<usize>) -> String {
    let segments = feature.module_segments();
    let take = depth.map_or(segments.len(), |d| d.min(segments.len()));
    if take == 0 {
        ROOT_MODULE.to_string()
    } else {
        segments[..take].join(".")
    }
}

/// Module assignment for both sides of one match result
#[derive(Debug, Clone)]
pub struct ModuleMap {
    depth: Option<usize>,
    remap: BTreeMap<String, String>,
}

impl ModuleMap {
    pub fn new(result: &MatchResult<'_>, depth: Option<usize>) -> Self {
        let base_modules: BTreeSet<String> = result
            .base()
            .features()
            .iter()
            .map(|f| module_key(f, depth))
            .collect();

        let mut remap = BTreeMap::new();
        for feature in result.target().features() {
            let key = module_key(feature, depth);
            if base_modules.contains(&key) || remap.contains_key(&key) {
                continue;
            }
            if let Some(closest) = closest_module(&key, &base_modules) {
                remap.insert(key, closest);
            }
        }

        Self { depth, remap }
    }

    pub fn base_module(&self, feature: &Feature) -> String {
        module_key(feature, self.depth)
    }

    pub fn target_module(&self, feature: &Feature) -> String {
        let key = module_key(feature, self.depth);
        match self.remap.get(&key) {
            Some(module) => module.clone(),
            None => key,
        }
    }

    /// Target modules filed under a differently named base module
    pub fn remapped(&self) -> &BTreeMap<String, String> {
        &self.remap
    }
}

fn key_segments(key: &str) -> Vec<String> {
    if key == ROOT_MODULE {
        Vec::new()
    } else {
        key.split('.').map(String::from).collect()
    }
}

/// Most similar base module at or above the remap threshold; ties go to the first in order
fn closest_module(key: &str, base_modules: &BTreeSet<String>) -> Option<String> {
    let segments = key_segments(key);
    let mut best: Option<(&String, f64)> = None;

    for candidate in base_modules {
        let score = namespace_similarity(&segments, &key_segments(candidate));
        if score >= NAMESPACE_REMAP_THRESHOLD && best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    best.map(|(module, _)| module.clone())
}

/// Group every entry of a result by module, sorted by prefix
pub fn aggregate_by_module(
    result: &MatchResult<'_>,
    depth: Option<usize>,
) -> BTreeMap<String, ModuleBreakdown> {
    let modules = ModuleMap::new(result, depth);
    let mut counts: BTreeMap<String, MatchCounts> = BTreeMap::new();

    for pair in result.matched() {
        counts.entry(modules.base_module(pair.base)).or_default().matched += 1;
    }
    for feature in result.unmatched_base() {
        counts.entry(modules.base_module(feature)).or_default().unmatched_base += 1;
    }
    for feature in result.unmatched_target() {
        counts.entry(modules.target_module(feature)).or_default().unmatched_target += 1;
    }

    counts
        .into_iter()
        .map(|(module, counts)| {
            let breakdown = ModuleBreakdown {
                counts,
                score: counts.symmetric(),
            };
            (module, breakdown)
        })
        .collect()
}
