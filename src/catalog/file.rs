//! Catalog backed by a JSON project snapshot on disk.
//!
//! The snapshot has the same shape as an exported configuration, so the
//! output of `export` can be loaded back. Tasks may be listed either as bare
//! names or as `{ "name", "description" }` objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::{CatalogError, CatalogProvider, CatalogResult};
use crate::project::{
    DEFAULT_ENVIRONMENT, Environment, Feature, ProjectMetadata, Task,
};
use crate::runtime::Runtime;

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum TaskEntry {
    Name(String),
    Full(Task),
}

impl From<TaskEntry> for Task {
    fn from(entry: TaskEntry) -> Self {
        match entry {
            TaskEntry::Name(name) => Task::new(name, ""),
            TaskEntry::Full(task) => task,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProjectSnapshot {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    python_version: Option<String>,
    #[serde(default)]
    current_environment: Option<String>,
    #[serde(default)]
    environments: Vec<Environment>,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// Catalog that re-reads a JSON snapshot on every query.
pub struct FileCatalog<R: Runtime> {
    runtime: Arc<R>,
    path: PathBuf,
}

impl<R: Runtime> FileCatalog<R> {
    pub fn new(runtime: Arc<R>, path: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, what: &'static str) -> CatalogResult<ProjectSnapshot> {
        if !self.runtime.exists(&self.path) {
            return Err(CatalogError::NotAProject(self.path.clone()));
        }

        debug!("Loading {} from {:?}", what, self.path);
        let content =
            self.runtime
                .read_to_string(&self.path)
                .map_err(|e| CatalogError::Lookup {
                    what,
                    reason: format!("{:#}", e),
                })?;

        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl<R: Runtime> CatalogProvider for FileCatalog<R> {
    async fn detect(&self) -> CatalogResult<bool> {
        Ok(self.runtime.exists(&self.path))
    }

    async fn metadata(&self) -> CatalogResult<ProjectMetadata> {
        let snapshot = self.load("project metadata")?;
        Ok(ProjectMetadata {
            name: snapshot.name,
            description: snapshot.description,
            python_version: snapshot.python_version,
        })
    }

    async fn current_environment(&self) -> CatalogResult<String> {
        let snapshot = self.load("current environment")?;
        Ok(snapshot
            .current_environment
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()))
    }

    async fn environments(&self) -> CatalogResult<Vec<Environment>> {
        Ok(self.load("environments")?.environments)
    }

    async fn features(&self) -> CatalogResult<Vec<Feature>> {
        Ok(self.load("features")?.features)
    }

    async fn tasks(&self) -> CatalogResult<Vec<Task>> {
        Ok(self
            .load("tasks")?
            .tasks
            .into_iter()
            .map(Task::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    const SNAPSHOT: &str = r#"{
        "name": "snapshot-project",
        "description": "Loaded from disk",
        "pythonVersion": "3.12",
        "currentEnvironment": "dev",
        "environments": [
            { "name": "default", "features": ["default"], "inheritDefault": false },
            { "name": "dev", "features": ["dev-tools"] }
        ],
        "features": [
            { "name": "default", "packages": [{ "name": "python", "version": "3.12" }], "isDefault": true },
            { "name": "dev-tools", "packages": [{ "name": "ruff", "channel": "conda-forge" }] }
        ],
        "tasks": ["lint", { "name": "test", "description": "Run tests" }]
    }"#;

    fn catalog_with(content: Option<&'static str>) -> FileCatalog<MockRuntime> {
        let path = PathBuf::from("/project/pixi-panel.json");
        let mut runtime = MockRuntime::new();

        runtime
            .expect_exists()
            .with(eq(path.clone()))
            .returning(move |_| content.is_some());
        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(move |_| Ok(content.unwrap_or_default().to_string()));

        FileCatalog::new(Arc::new(runtime), path)
    }

    #[tokio::test]
    async fn test_file_catalog_reads_snapshot() {
        let catalog = catalog_with(Some(SNAPSHOT));

        assert_eq!(catalog.path(), Path::new("/project/pixi-panel.json"));
        assert!(catalog.detect().await.unwrap());

        let meta = catalog.metadata().await.unwrap();
        assert_eq!(meta.name, "snapshot-project");
        assert_eq!(meta.python_version.as_deref(), Some("3.12"));

        assert_eq!(catalog.current_environment().await.unwrap(), "dev");

        let envs = catalog.environments().await.unwrap();
        assert_eq!(envs.len(), 2);
        assert_eq!(envs[1].inherit_default, None);

        let features = catalog.features().await.unwrap();
        assert!(features[0].is_default);
        assert_eq!(
            features[1].packages[0].channel.as_deref(),
            Some("conda-forge")
        );
    }

    #[tokio::test]
    async fn test_file_catalog_accepts_task_names_and_objects() {
        let catalog = catalog_with(Some(SNAPSHOT));

        let tasks = catalog.tasks().await.unwrap();
        assert_eq!(tasks, vec![Task::new("lint", ""), Task::new("test", "Run tests")]);
    }

    #[tokio::test]
    async fn test_file_catalog_missing_file() {
        let catalog = catalog_with(None);

        assert!(!catalog.detect().await.unwrap());
        assert!(matches!(
            catalog.environments().await,
            Err(CatalogError::NotAProject(_))
        ));
    }

    #[tokio::test]
    async fn test_file_catalog_malformed_snapshot() {
        let catalog = catalog_with(Some("{ not json"));

        assert!(matches!(
            catalog.features().await,
            Err(CatalogError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_file_catalog_defaults_current_environment() {
        let catalog = catalog_with(Some(r#"{ "name": "bare" }"#));

        assert_eq!(catalog.current_environment().await.unwrap(), "default");
        assert!(catalog.tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_catalog_read_failure_is_lookup_error() {
        let path = PathBuf::from("/project/pixi-panel.json");
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let catalog = FileCatalog::new(Arc::new(runtime), path);
        let err = catalog.metadata().await.unwrap_err();

        assert!(matches!(err, CatalogError::Lookup { what: "project metadata", .. }));
        assert!(err.to_string().contains("permission denied"));
    }
}
