//! N-way parity matrix
//!
//! Every unordered pair of registries is matched once; the symmetric score
//! fills both mirrored cells. The diagonal carries no score.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::info;

use crate::error::{ParityError, Result};
use crate::feature::Language;
use crate::matcher::{validate_alpha, Matcher};
use crate::metrics::MatchCounts;
use crate::registry::FeatureRegistry;

use super::{percent, status_icon};

/// Pairwise symmetric scores over N registries, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix {
    pub languages: Vec<Language>,
    pub labels: Vec<String>,
    pub alpha: f64,
    /// `scores[i][j]`, `None` on the diagonal
    pub scores: Vec<Vec<Option<f64>>>,
}

impl PairwiseMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn score(&self, i: usize, j: usize) -> Option<f64> {
        self.scores.get(i).and_then(|row| row.get(j).copied().flatten())
    }
}

/// Column labels: language name plus version, suffixed with `#n` on collisions
fn labels(registries: &[FeatureRegistry]) -> Vec<String> {
    let raw: Vec<String> = registries
        .iter()
        .map(|r| match r.version() {
            Some(v) => format!("{} {}", r.language().display_name(), v),
            None => r.language().display_name().to_string(),
        })
        .collect();

    let mut totals: HashMap<&str, usize> = HashMap::new();
    for label in &raw {
        *totals.entry(label.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    raw.iter()
        .map(|label| {
            if totals[label.as_str()] > 1 {
                let n = seen.entry(label.as_str()).or_default();
                *n += 1;
                format!("{} #{}", label, n)
            } else {
                label.clone()
            }
        })
        .collect()
}

/// Match every registry pair and collect the symmetric scores
pub fn compute_matrix(
    registries: &[FeatureRegistry],
    matcher: &Matcher,
    alpha: f64,
) -> Result<PairwiseMatrix> {
    if registries.len() < 2 {
        return Err(ParityError::TooFewRegistries {
            count: registries.len(),
        });
    }
    validate_alpha(alpha)?;

    let n = registries.len();
    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect();

    let scored = pairs
        .par_iter()
        .map(|&(i, j)| -> Result<(usize, usize, f64)> {
            let result = matcher.match_registries(&registries[i], &registries[j], alpha)?;
            Ok((i, j, MatchCounts::of(&result).symmetric()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut scores = vec![vec![None; n]; n];
    for (i, j, score) in scored {
        scores[i][j] = Some(score);
        scores[j][i] = Some(score);
    }

    info!(registries = n, pairs = pairs.len(), "Computed parity matrix");

    Ok(PairwiseMatrix {
        languages: registries.iter().map(|r| r.language()).collect(),
        labels: labels(registries),
        alpha,
        scores,
    })
}

/// Markdown table with one row and one column per registry
pub fn render_matrix(matrix: &PairwiseMatrix) -> String {
    let mut lines = vec![
        "# Feature Parity Matrix".to_string(),
        String::new(),
        format!("Similarity threshold (alpha): {:.2}", matrix.alpha),
        String::new(),
    ];

    let mut header = String::from("| |");
    let mut rule = String::from("|---|");
    for label in &matrix.labels {
        header.push_str(&format!(" **{}** |", label));
        rule.push_str("---|");
    }
    lines.push(header);
    lines.push(rule);

    for (i, label) in matrix.labels.iter().enumerate() {
        let mut row = format!("| **{}** |", label);
        for j in 0..matrix.len() {
            match matrix.score(i, j) {
                Some(score) => {
                    row.push_str(&format!(" {} {} |", percent(score), status_icon(score)))
                }
                None => row.push_str(" - |"),
            }
        }
        lines.push(row);
    }

    lines.join("\n") + "\n"
}
