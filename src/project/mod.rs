//! Project data model: packages, features, environments and tasks.
//!
//! All types are plain immutable snapshots. They are rebuilt from the catalog
//! provider on every query and never mutated in place.

mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::{dedup_by_name, resolve_features, resolve_packages};

/// Name of the environment that holds the default feature directly.
/// This environment never goes through the default-inheritance step.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// A package pinned inside a feature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            channel: None,
        }
    }
}

/// A named, ordered bundle of packages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<Package>,
    /// At most one feature in a catalog is expected to carry this flag.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

/// A named activation context selecting features by reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_default: Option<bool>,
    /// Direct packages. Kept so snapshots round-trip, resolution ignores them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,
}

impl Environment {
    pub fn new(name: impl Into<String>, features: &[&str], inherit_default: bool) -> Self {
        Self {
            name: name.into(),
            features: features.iter().map(|f| f.to_string()).collect(),
            inherit_default: Some(inherit_default),
            packages: Vec::new(),
        }
    }

    /// An unset flag counts as inheriting.
    pub fn inherits_default(&self) -> bool {
        self.inherit_default != Some(false)
    }
}

/// A runnable project task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Task {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Descriptive project fields that are not part of the resolution catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: Option<String>,
    pub python_version: Option<String>,
}

/// The environment and feature catalog that resolution runs over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub environments: Vec<Environment>,
    pub features: Vec<Feature>,
}

impl Catalog {
    pub fn new(environments: Vec<Environment>, features: Vec<Feature>) -> Self {
        Self {
            environments,
            features,
        }
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// The first feature flagged as default, if any.
    pub fn default_feature(&self) -> Option<&Feature> {
        self.features.iter().find(|f| f.is_default)
    }
}

/// Aggregate snapshot handed to the presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub is_pixi_project: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_environment: Option<String>,
    #[serde(default)]
    pub environments: Vec<Environment>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl ProjectInfo {
    /// The snapshot reported when no project is detected.
    pub fn not_a_project() -> Self {
        Self::default()
    }
}

/// Full configuration snapshot produced by an export.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    pub environments: Vec<Environment>,
    pub features: Vec<Feature>,
    pub tasks: Vec<String>,
}

/// Options for creating a new project.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub initial_packages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherits_default_when_unset() {
        let mut env = Environment::new("dev", &["dev-tools"], true);
        assert!(env.inherits_default());

        env.inherit_default = None;
        assert!(env.inherits_default());

        env.inherit_default = Some(false);
        assert!(!env.inherits_default());
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog::new(
            vec![Environment::new("dev", &["default"], true)],
            vec![
                Feature {
                    name: "extra".into(),
                    packages: vec![],
                    is_default: false,
                },
                Feature {
                    name: "default".into(),
                    packages: vec![Package::new("python", "3.11")],
                    is_default: true,
                },
            ],
        );

        assert!(catalog.environment("dev").is_some());
        assert!(catalog.environment("prod").is_none());
        assert_eq!(catalog.feature("extra").unwrap().name, "extra");
        assert_eq!(catalog.default_feature().unwrap().name, "default");
    }

    #[test]
    fn test_feature_serializes_camel_case() {
        let feature = Feature {
            name: "default".into(),
            packages: vec![Package::new("python", "3.11")],
            is_default: true,
        };

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "default",
                "packages": [{ "name": "python", "version": "3.11" }],
                "isDefault": true
            })
        );
    }

    #[test]
    fn test_non_default_feature_omits_flag() {
        let feature = Feature {
            name: "dev-tools".into(),
            packages: vec![],
            is_default: false,
        };

        let json = serde_json::to_value(&feature).unwrap();
        assert!(json.get("isDefault").is_none());
    }

    #[test]
    fn test_environment_deserializes_without_optional_fields() {
        let env: Environment =
            serde_json::from_str(r#"{ "name": "dev", "features": ["default"] }"#).unwrap();

        assert_eq!(env.inherit_default, None);
        assert!(env.inherits_default());
        assert!(env.packages.is_empty());
    }

    #[test]
    fn test_environment_direct_packages_round_trip() {
        let mut env = Environment::new("solo", &[], false);
        env.packages = vec![Package::new("zlib", "1.3")];

        let json = serde_json::to_string(&env).unwrap();
        let back: Environment = serde_json::from_str(&json).unwrap();

        assert_eq!(back, env);
        assert_eq!(back.packages[0].name, "zlib");
    }

    #[test]
    fn test_not_a_project_is_empty() {
        let info = ProjectInfo::not_a_project();
        assert!(!info.is_pixi_project);
        assert!(info.name.is_none());
        assert!(info.current_environment.is_none());
        assert!(info.environments.is_empty());
        assert!(info.features.is_empty());
    }
}
