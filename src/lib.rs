//! Feature Parity
//!
//! Matches the public features of SDKs written in different languages and
//! reports how closely their surfaces agree.
//!
//! ## Features
//!
//! - **Normalization**: `get_user`, `getUser` and `GetUser` compare as equal
//! - **Optimal Matching**: one-to-one assignment over the full similarity matrix
//! - **Parity Metrics**: Jaccard, precision, recall and F1
//! - **Module Breakdown**: per-namespace rollups of the same metrics
//! - **Reports**: symmetric, directional, raw CSV, markdown and N-way matrix
//!
//! ## Pipeline
//!
//! ```text
//! registry JSON ──► FeatureRegistry ──► Matcher ──► MatchResult
//!                                                    ├── Metrics
//!                                                    ├── aggregate_by_module
//!                                                    └── report::render_*
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod feature;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod registry;
pub mod report;
pub mod similarity;

pub use aggregate::{aggregate_by_module, ModuleBreakdown};
pub use config::ParityConfig;
pub use error::{ParityError, Result};
pub use feature::{Feature, FeatureKind, Language};
pub use matcher::{match_registries, MatchResult, MatchedPair, Matcher};
pub use metrics::{MatchCounts, Metrics};
pub use registry::FeatureRegistry;
pub use report::{
    compute_matrix, output_filename, render_matrix, render_pairwise, PairwiseMatrix, ReportType,
};
pub use similarity::{SimilarityScorer, SimilarityWeights};
