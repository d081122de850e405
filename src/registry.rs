//! Feature Registry
//!
//! The read-only collection of features extracted from one SDK implementation.
//! Registries are produced by an external extraction step and decoded here from
//! their JSON file format:
//!
//! ```json
//! {
//!   "language": "python",
//!   "version": "1.4.0",
//!   "features": [
//!     { "kind": "function", "name": "get_user", "namespace": ["pkg", "users"] },
//!     {
//!       "kind": "method",
//!       "name": "run",
//!       "namespace": "google.adk.runners",
//!       "member_of": "Runner"
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ParityError, Result};
use crate::feature::{Feature, FeatureKind, Language};

/// An ordered, language-tagged collection of features
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    language: Language,
    version: Option<String>,
    features: Vec<Feature>,
}

impl FeatureRegistry {
    /// Build a registry, checking that every feature carries the registry's language
    pub fn new(language: Language, features: Vec<Feature>) -> Result<Self> {
        if let Some(stray) = features.iter().find(|f| f.language() != language) {
            return Err(ParityError::LanguageMismatch {
                registry: language.to_string(),
                feature: stray.language().to_string(),
                name: stray.name().to_string(),
            });
        }
        Ok(Self {
            language,
            version: None,
            features,
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Decode a registry from its JSON representation
    pub fn from_json(content: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(content)?;
        file.into_registry()
    }

    /// Load a registry file. Any failure is reported against the path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(ParityError::from)
            .and_then(|content| Self::from_json(&content));

        loaded.map_err(|e| ParityError::RegistryLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// On-disk registry layout
#[derive(Debug, Deserialize)]
struct RegistryFile {
    language: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    features: Vec<FeatureRecord>,
}

#[derive(Debug, Deserialize)]
struct FeatureRecord {
    kind: FeatureKind,
    name: String,
    #[serde(default)]
    namespace: NamespaceRecord,
    #[serde(default)]
    member_of: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

/// Namespaces may be written as a segment list or a single delimited path
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NamespaceRecord {
    Segments(Vec<String>),
    Path(String),
}

impl Default for NamespaceRecord {
    fn default() -> Self {
        NamespaceRecord::Segments(Vec::new())
    }
}

impl NamespaceRecord {
    fn into_segments(self) -> Vec<String> {
        match self {
            NamespaceRecord::Segments(segments) => segments,
            NamespaceRecord::Path(path) => path
                .split(|c: char| c == '.' || c == '/' || c == ':')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

impl RegistryFile {
    fn into_registry(self) -> Result<FeatureRegistry> {
        let language: Language = self.language.parse()?;

        let features = self
            .features
            .into_iter()
            .map(|record| -> Result<Feature> {
                let feature_language = match &record.language {
                    Some(tag) => tag.parse()?,
                    None => language,
                };
                Ok(Feature::new(
                    feature_language,
                    record.kind,
                    record.name,
                    record.namespace.into_segments(),
                )
                .with_member_of(record.member_of))
            })
            .collect::<Result<Vec<_>>>()?;

        let registry = FeatureRegistry::new(language, features)?;
        Ok(match self.version {
            Some(version) => registry.with_version(version),
            None => registry,
        })
    }
}
