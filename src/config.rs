//! Configuration management for parity reports
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (parity.toml)
//! - Environment variables (PARITY__*)
//!
//! ## Example config file (parity.toml):
//! ```toml
//! [matching]
//! alpha = 0.8
//! near_miss_margin = 0.15
//! parallel = true
//!
//! [weights]
//! name = 0.6
//! kind = 0.25
//! namespace = 0.15
//!
//! [report]
//! module_depth = 3
//! default_type = "md"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::validate_alpha;
use crate::report::ReportType;
use crate::similarity::SimilarityWeights;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParityConfig {
    /// Matching thresholds
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Similarity weights
    #[serde(default)]
    pub weights: SimilarityWeights,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity for an accepted match
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Margin below alpha reported as near misses (0 disables)
    #[serde(default = "default_near_miss_margin")]
    pub near_miss_margin: f64,

    /// Score cost matrices and registry pairs in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Namespace tokens kept when grouping modules (absent = full namespace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_depth: Option<usize>,

    /// Report type used when none is given on the command line
    #[serde(default = "default_report_type")]
    pub default_type: String,
}

fn default_alpha() -> f64 {
    0.8
}

fn default_near_miss_margin() -> f64 {
    0.15
}

fn default_true() -> bool {
    true
}

fn default_report_type() -> String {
    "md".to_string()
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            near_miss_margin: default_near_miss_margin(),
            parallel: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            module_depth: None,
            default_type: default_report_type(),
        }
    }
}

impl ParityConfig {
    /// Load configuration from the default locations, then an explicit file if given
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["parity.toml", ".parity.toml", "config/parity.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        let project_dirs = directories::ProjectDirs::from("dev", "familiar", "feature-parity");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("parity.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment variables (PARITY__MATCHING__ALPHA=0.9)
        builder = builder.add_source(
            Environment::with_prefix("PARITY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.matching.alpha)?;
        self.weights.validate()?;
        self.report.default_type.parse::<ReportType>()?;
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParityError;

    #[test]
    fn test_default_config() {
        let config = ParityConfig::default();
        assert_eq!(config.matching.alpha, 0.8);
        assert_eq!(config.matching.near_miss_margin, 0.15);
        assert!(config.matching.parallel);
        assert_eq!(config.weights, SimilarityWeights::default());
        assert!(config.report.module_depth.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialize_config() {
        let config = ParityConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[matching]"));
        assert!(toml_str.contains("[weights]"));
        assert!(toml_str.contains("[report]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            concat!(
                "[matching]\nalpha = 0.65\n\n",
                "[weights]\nname = 0.7\nkind = 0.2\nnamespace = 0.1\n\n",
                "[report]\nmodule_depth = 2\n",
            ),
        )
        .unwrap();

        let config = ParityConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.matching.alpha, 0.65);
        assert_eq!(config.weights.name, 0.7);
        assert_eq!(config.report.module_depth, Some(2));
        assert_eq!(config.report.default_type, "md");
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let path = path.to_str().unwrap();

        let mut config = ParityConfig::default();
        config.matching.alpha = 0.7;
        config.matching.parallel = false;
        config.weights = SimilarityWeights {
            name: 0.5,
            kind: 0.3,
            namespace: 0.2,
        };
        config.report.module_depth = Some(1);
        config.report.default_type = "raw".to_string();
        config.save(path).unwrap();

        let loaded = ParityConfig::load_from(Some(path)).unwrap();
        assert_eq!(loaded.matching.alpha, 0.7);
        assert!(!loaded.matching.parallel);
        assert_eq!(loaded.weights, config.weights);
        assert_eq!(loaded.report.module_depth, Some(1));
        assert_eq!(loaded.report.default_type, "raw");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ParityConfig::default();
        config.matching.alpha = 1.2;
        assert!(matches!(config.validate(), Err(ParityError::InvalidAlpha(_))));

        let mut config = ParityConfig::default();
        config.report.default_type = "pdf".to_string();
        assert!(matches!(config.validate(), Err(ParityError::UnknownReportType(_))));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let err = ParityConfig::load_from(Some("/nonexistent/parity.toml")).unwrap_err();
        assert!(matches!(err, ParityError::Config(_)));
    }
}
