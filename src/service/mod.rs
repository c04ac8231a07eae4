//! Project service - the operations offered to the presentation layer.
//!
//! Read-style queries (project info, packages, features, tasks) never fail:
//! lookup errors are logged and degrade to empty values. Action-style
//! operations (commands, tasks, project lifecycle, export) return errors with
//! a descriptive context.

mod command;
mod task;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::catalog::{CatalogProvider, CatalogResult};
use crate::project::{
    self, Catalog, ExportedConfig, Feature, InitOptions, Package, ProjectInfo, Task,
};
use crate::runtime::Runtime;

pub use command::{COMMAND_SUCCESS, CommandRunner, SimulatedRunner};
pub use task::{TaskEvent, TaskObserver};

#[cfg(test)]
pub use command::MockCommandRunner;

const INIT_DELAY: Duration = Duration::from_millis(1000);
const EDIT_DELAY: Duration = Duration::from_millis(500);
const REINIT_DELAY: Duration = Duration::from_millis(1500);
const EXPORT_DELAY: Duration = Duration::from_millis(500);

/// Options for the project service
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Suspend for the fixed per-operation delays
    pub simulate_latency: bool,
    /// Environment that replaces the catalog's current environment
    pub environment_override: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            environment_override: None,
        }
    }
}

pub struct ProjectService<R: Runtime> {
    runtime: Arc<R>,
    catalog: Arc<dyn CatalogProvider>,
    runner: Arc<dyn CommandRunner>,
    options: ServiceOptions,
}

/// Unwrap a read-path result, logging the failure and falling back to the default.
fn or_default<T: Default>(result: CatalogResult<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to get {}: {}", what, e);
            T::default()
        }
    }
}

impl<R: Runtime> ProjectService<R> {
    pub fn new(
        runtime: Arc<R>,
        catalog: Arc<dyn CatalogProvider>,
        runner: Arc<dyn CommandRunner>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            runtime,
            catalog,
            runner,
            options,
        }
    }

    async fn pause(&self, duration: Duration) {
        if self.options.simulate_latency && !duration.is_zero() {
            self.runtime.sleep(duration).await;
        }
    }

    async fn current_environment(&self) -> Option<String> {
        if let Some(env) = &self.options.environment_override {
            debug!("Using environment override {:?}", env);
            return Some(env.clone());
        }
        match self.catalog.current_environment().await {
            Ok(env) => Some(env),
            Err(e) => {
                warn!("Failed to get current environment: {}", e);
                None
            }
        }
    }

    async fn load_catalog(&self) -> Catalog {
        let environments = or_default(self.catalog.environments().await, "environments");
        let features = or_default(self.catalog.features().await, "features");
        Catalog::new(environments, features)
    }

    /// Snapshot of the project. Reports "not a project" when detection fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_project_info(&self) -> ProjectInfo {
        let detected = match self.catalog.detect().await {
            Ok(detected) => detected,
            Err(e) => {
                warn!("Failed to detect project: {}", e);
                false
            }
        };
        if !detected {
            debug!("No project detected");
            return ProjectInfo::not_a_project();
        }

        let name = match self.catalog.metadata().await {
            Ok(meta) => Some(meta.name),
            Err(e) => {
                warn!("Failed to get project name: {}", e);
                None
            }
        };
        let current_environment = self.current_environment().await;
        let catalog = self.load_catalog().await;

        ProjectInfo {
            is_pixi_project: true,
            name,
            current_environment,
            environments: catalog.environments,
            features: catalog.features,
        }
    }

    /// Packages installed in `environment`, or in the current environment
    /// when `None` or blank.
    #[tracing::instrument(skip(self))]
    pub async fn get_installed_packages(&self, environment: Option<&str>) -> Vec<Package> {
        let target = match environment.filter(|env| !env.trim().is_empty()) {
            Some(env) => env.to_string(),
            None => match self.current_environment().await {
                Some(env) => env,
                None => return Vec::new(),
            },
        };

        let catalog = self.load_catalog().await;
        project::resolve_packages(&catalog, &target)
    }

    /// Features referenced by `environment`, without default inheritance.
    #[tracing::instrument(skip(self))]
    pub async fn get_features_for_environment(&self, environment: &str) -> Vec<Feature> {
        let catalog = self.load_catalog().await;
        project::resolve_features(&catalog, environment)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_available_tasks(&self) -> Vec<Task> {
        or_default(self.catalog.tasks().await, "tasks")
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute_command(&self, command: &str, args: &[String]) -> Result<String> {
        self.runner
            .run(command, args)
            .await
            .context("Failed to execute pixi command")
    }

    /// Add `package` to `feature`.
    #[tracing::instrument(skip(self))]
    pub async fn add_package(&self, package: &str, feature: &str) -> Result<String> {
        if package.trim().is_empty() || feature.trim().is_empty() {
            anyhow::bail!("Missing package or feature");
        }
        let args = vec![
            package.to_string(),
            "--feature".to_string(),
            feature.to_string(),
        ];
        self.execute_command("add", &args).await
    }

    /// Run a task, reporting each progress step to `observer`.
    ///
    /// The suspensions happen whether or not an observer is given.
    #[tracing::instrument(skip(self, observer))]
    pub async fn execute_task(
        &self,
        task_name: &str,
        observer: Option<&dyn TaskObserver>,
    ) -> Result<()> {
        for (delay, event) in task::timeline(task_name) {
            self.pause(delay).await;
            debug!("{}", event);
            if let Some(observer) = observer {
                observer.on_event(&event);
            }
        }
        Ok(())
    }

    /// Request that the running task stop. In-flight tasks are not interrupted.
    #[tracing::instrument(skip(self))]
    pub async fn stop_current_task(&self) -> Result<()> {
        info!("Stopping current task...");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn initialize_project(&self, options: &InitOptions) -> Result<()> {
        info!("Initializing pixi project with config: {:?}", options);
        self.pause(INIT_DELAY).await;
        info!("Project '{}' initialized successfully", options.name);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn edit_configuration(&self) -> Result<()> {
        info!("Opening configuration for editing...");
        self.pause(EDIT_DELAY).await;
        info!("Configuration opened for editing");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn reinitialize_project(&self) -> Result<()> {
        info!("Re-initializing pixi project...");
        self.pause(REINIT_DELAY).await;
        info!("Project re-initialized successfully");
        Ok(())
    }

    /// Full configuration snapshot, including the task names.
    #[tracing::instrument(skip(self))]
    pub async fn export_configuration(&self) -> Result<ExportedConfig> {
        info!("Exporting project configuration...");
        self.pause(EXPORT_DELAY).await;

        let meta = self
            .catalog
            .metadata()
            .await
            .context("Failed to export configuration")?;
        let environments = self
            .catalog
            .environments()
            .await
            .context("Failed to export configuration")?;
        let features = self
            .catalog
            .features()
            .await
            .context("Failed to export configuration")?;
        let tasks = self
            .catalog
            .tasks()
            .await
            .context("Failed to export configuration")?;

        info!("Configuration exported successfully");
        Ok(ExportedConfig {
            name: meta.name,
            description: meta.description,
            python_version: meta.python_version,
            environments,
            features,
            tasks: tasks.into_iter().map(|t| t.name).collect(),
        })
    }
}
