//! Feature types: the unit of comparison between SDK implementations

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::ParityError;
use crate::normalize;

/// Source ecosystem a registry was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Python,
    TypeScript,
    Java,
    Go,
}

impl Language {
    /// Short code used in file names and CSV headers (e.g. "py")
    pub fn code(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::TypeScript => "ts",
            Language::Java => "java",
            Language::Go => "go",
        }
    }

    /// Capitalized name used in markdown reports (e.g. "TypeScript")
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Go => "Go",
        }
    }
}

impl FromStr for Language {
    type Err = ParityError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "java" => Ok(Language::Java),
            "go" | "golang" => Ok(Language::Go),
            _ => Err(ParityError::UnknownLanguage(tag.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Categorical type of a feature. Kinds are compared by exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    #[serde(alias = "constructor")]
    Function,
    #[serde(alias = "instance_method", alias = "class_method")]
    Method,
    Class,
    Property,
    Constant,
    Module,
    Agent,
    Tool,
    Other,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Function => "function",
            FeatureKind::Method => "method",
            FeatureKind::Class => "class",
            FeatureKind::Property => "property",
            FeatureKind::Constant => "constant",
            FeatureKind::Module => "module",
            FeatureKind::Agent => "agent",
            FeatureKind::Tool => "tool",
            FeatureKind::Other => "other",
        }
    }

    /// Ordering used when listing features inside a module section
    pub(crate) fn report_priority(&self) -> u8 {
        match self {
            FeatureKind::Module => 0,
            FeatureKind::Class => 1,
            FeatureKind::Agent => 2,
            FeatureKind::Tool => 3,
            FeatureKind::Function => 4,
            FeatureKind::Method => 5,
            FeatureKind::Property => 6,
            FeatureKind::Constant => 7,
            FeatureKind::Other => 8,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted semantic unit.
///
/// Identity fields are fixed at construction. Normalized forms are computed
/// on first access and cached on the feature itself.
#[derive(Debug, Clone)]
pub struct Feature {
    language: Language,
    kind: FeatureKind,
    name: String,
    namespace: Vec<String>,
    member_of: Option<String>,
    normalized_name: OnceCell<String>,
    normalized_namespace: OnceCell<Vec<String>>,
    module_segments: OnceCell<Vec<String>>,
}

impl Feature {
    pub fn new<S, I>(
        language: Language,
        kind: FeatureKind,
        name: impl Into<String>,
        namespace: I,
    ) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            language,
            kind,
            name: name.into(),
            namespace: namespace.into_iter().map(Into::into).collect(),
            member_of: None,
            normalized_name: OnceCell::new(),
            normalized_namespace: OnceCell::new(),
            module_segments: OnceCell::new(),
        }
    }

    /// Attach the owning type. `None`, empty and the literal "null" mean no owner.
    pub fn with_member_of(mut self, member_of: Option<impl Into<String>>) -> Self {
        self.member_of = member_of
            .map(Into::into)
            .filter(|m: &String| !m.is_empty() && !m.eq_ignore_ascii_case("null"));
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    pub fn member_of(&self) -> Option<&str> {
        self.member_of.as_deref()
    }

    pub fn normalized_name(&self) -> &str {
        self.normalized_name.get_or_init(|| normalize::normalize(&self.name))
    }

    pub fn normalized_namespace(&self) -> &[String] {
        self.normalized_namespace
            .get_or_init(|| normalize::normalize_namespace(&self.namespace))
    }

    /// One normalized key per namespace segment, used for module grouping
    pub fn module_segments(&self) -> &[String] {
        self.module_segments
            .get_or_init(|| normalize::module_segments(&self.namespace))
    }

    /// Raw namespace joined with '.'
    pub fn namespace_path(&self) -> String {
        self.namespace.join(".")
    }

    /// Name as shown in reports: `Owner.name` when the feature has an owner
    pub fn display_name(&self) -> String {
        match &self.member_of {
            Some(owner) => format!("{}.{}", owner, self.name),
            None => self.name.clone(),
        }
    }

    /// Namespace and display name, e.g. `pkg.users.User.get`
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.display_name()
        } else {
            format!("{}.{}", self.namespace_path(), self.display_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!("PY".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("golang".parse::<Language>().unwrap(), Language::Go);
        assert_eq!(Language::TypeScript.code(), "ts");
        assert_eq!(Language::TypeScript.display_name(), "TypeScript");
    }

    #[test]
    fn test_unknown_language_is_flagged() {
        let err = "cobol".parse::<Language>().unwrap_err();
        assert!(matches!(err, ParityError::UnknownLanguage(tag) if tag == "cobol"));
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_kind_aliases() {
        let kind: FeatureKind = serde_json::from_str("\"instance_method\"").unwrap();
        assert_eq!(kind, FeatureKind::Method);
        let kind: FeatureKind = serde_json::from_str("\"constructor\"").unwrap();
        assert_eq!(kind, FeatureKind::Function);
    }

    #[test]
    fn test_normalized_fields_are_memoized() {
        let feature = Feature::new(
            Language::Python,
            FeatureKind::Function,
            "getUserName",
            ["pkg", "users"],
        );
        let first = feature.normalized_name().as_ptr();
        let second = feature.normalized_name().as_ptr();
        assert_eq!(first, second);
        assert_eq!(feature.normalized_name(), "get_user_name");
    }

    #[test]
    fn test_null_member_of_is_absent() {
        let feature = Feature::new(Language::Go, FeatureKind::Method, "Run", ["runner"])
            .with_member_of(Some("null"));
        assert_eq!(feature.member_of(), None);
        assert_eq!(feature.qualified_name(), "runner.Run");

        let feature = Feature::new(Language::Go, FeatureKind::Method, "Run", ["runner"])
            .with_member_of(Some("Runner"));
        assert_eq!(feature.display_name(), "Runner.Run");
    }
}
