//! Catalog providers.
//!
//! A catalog provider answers the read-side questions about a project:
//! whether one exists, its descriptive metadata, its current environment,
//! and its environment, feature and task lists. The service never touches a
//! concrete source directly, so the hardcoded demo catalog and the JSON
//! snapshot catalog are interchangeable.

mod demo;
mod file;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::project::{Environment, Feature, ProjectMetadata, Task};

pub use demo::DemoCatalog;
pub use file::FileCatalog;

/// Failures a catalog provider can report.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No project exists at the expected location.
    #[error("Not a pixi project: {0}")]
    NotAProject(PathBuf),

    /// The project exists but the requested data could not be read.
    #[error("Failed to look up {what}: {reason}")]
    Lookup { what: &'static str, reason: String },

    /// The project data is malformed.
    #[error("Failed to parse project snapshot {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Trait for project catalog sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Whether a project exists at all.
    async fn detect(&self) -> CatalogResult<bool>;

    /// Project name, description and python version.
    async fn metadata(&self) -> CatalogResult<ProjectMetadata>;

    /// The environment that is currently active.
    async fn current_environment(&self) -> CatalogResult<String>;

    /// Declared environments, in manifest order.
    async fn environments(&self) -> CatalogResult<Vec<Environment>>;

    /// Declared features with their packages, in manifest order.
    async fn features(&self) -> CatalogResult<Vec<Feature>>;

    /// Declared tasks, in manifest order.
    async fn tasks(&self) -> CatalogResult<Vec<Task>>;
}
