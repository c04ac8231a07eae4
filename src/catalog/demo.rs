//! Hardcoded demo catalog.

use async_trait::async_trait;

use super::{CatalogProvider, CatalogResult};
use crate::project::{
    DEFAULT_ENVIRONMENT, Environment, Feature, Package, ProjectMetadata, Task,
};

/// Catalog with a fixed demo project. Every call builds fresh values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn new() -> Self {
        Self
    }
}

fn feature(name: &str, packages: &[(&str, &str)], is_default: bool) -> Feature {
    Feature {
        name: name.to_string(),
        packages: packages
            .iter()
            .map(|(name, version)| Package::new(*name, *version))
            .collect(),
        is_default,
    }
}

#[async_trait]
impl CatalogProvider for DemoCatalog {
    async fn detect(&self) -> CatalogResult<bool> {
        Ok(true)
    }

    async fn metadata(&self) -> CatalogResult<ProjectMetadata> {
        Ok(ProjectMetadata {
            name: "demo-pixi-project".to_string(),
            description: Some("A demo pixi project".to_string()),
            python_version: Some("3.11".to_string()),
        })
    }

    async fn current_environment(&self) -> CatalogResult<String> {
        Ok(DEFAULT_ENVIRONMENT.to_string())
    }

    async fn environments(&self) -> CatalogResult<Vec<Environment>> {
        Ok(vec![
            Environment::new(DEFAULT_ENVIRONMENT, &["default"], false),
            Environment::new("dev", &["default", "dev-tools"], true),
            Environment::new("test", &["default", "testing"], true),
            Environment::new("python310", &["python310"], true),
            Environment::new("python311", &["python311"], true),
        ])
    }

    async fn features(&self) -> CatalogResult<Vec<Feature>> {
        Ok(vec![
            feature(
                "default",
                &[("python", "3.11"), ("numpy", "1.24"), ("pandas", "2.0")],
                true,
            ),
            feature(
                "dev-tools",
                &[("pytest", "7.4"), ("black", "23.7"), ("flake8", "6.0")],
                false,
            ),
            feature("testing", &[("pytest", "7.4"), ("coverage", "7.2")], false),
            feature(
                "python310",
                &[("python", "3.10"), ("numpy", "1.24"), ("pandas", "2.0")],
                false,
            ),
            feature(
                "python311",
                &[("python", "3.11"), ("numpy", "1.24"), ("pandas", "2.0")],
                false,
            ),
        ])
    }

    async fn tasks(&self) -> CatalogResult<Vec<Task>> {
        Ok(vec![
            Task::new("test", "Run tests"),
            Task::new("build", "Build the project"),
            Task::new("dev", "Start development server"),
            Task::new("shell", "Open interactive shell"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_detects_project() {
        let catalog = DemoCatalog::new();

        assert!(catalog.detect().await.unwrap());
        assert_eq!(catalog.metadata().await.unwrap().name, "demo-pixi-project");
        assert_eq!(catalog.current_environment().await.unwrap(), "default");
    }

    #[tokio::test]
    async fn test_demo_catalog_has_single_default_feature() {
        let features = DemoCatalog::new().features().await.unwrap();

        let defaults: Vec<_> = features.iter().filter(|f| f.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "default");
    }

    #[tokio::test]
    async fn test_demo_catalog_references_resolve() {
        let catalog = DemoCatalog::new();
        let features = catalog.features().await.unwrap();

        for env in catalog.environments().await.unwrap() {
            for name in &env.features {
                assert!(
                    features.iter().any(|f| &f.name == name),
                    "{} references unknown feature {}",
                    env.name,
                    name
                );
            }
        }
    }

    #[tokio::test]
    async fn test_demo_catalog_tasks() {
        let tasks = DemoCatalog::new().tasks().await.unwrap();

        assert_eq!(
            tasks.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["test", "build", "dev", "shell"]
        );
        assert_eq!(tasks[0].description, "Run tests");
    }
}
