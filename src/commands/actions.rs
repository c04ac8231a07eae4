//! Commands that act on the project: tasks, package edits and lifecycle.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::project::InitOptions;
use crate::runtime::Runtime;
use crate::service::{ProjectService, TaskEvent, TaskObserver};

/// Run a task, printing its progress as it happens
#[tracing::instrument(skip(service))]
pub async fn run<R: Runtime>(service: &ProjectService<R>, task_name: &str) -> Result<()> {
    let printer = |event: &TaskEvent| println!("{}", event);
    service
        .execute_task(task_name, Some(&printer as &dyn TaskObserver))
        .await
        .context("Task execution failed")
}

/// Request that the running task stop
#[tracing::instrument(skip(service))]
pub async fn stop<R: Runtime>(service: &ProjectService<R>) -> Result<()> {
    service
        .stop_current_task()
        .await
        .context("Failed to stop task")?;
    println!("Stop requested.");
    Ok(())
}

/// Create a new project
#[tracing::instrument(skip(service))]
pub async fn init<R: Runtime>(service: &ProjectService<R>, options: &InitOptions) -> Result<()> {
    if options.name.trim().is_empty() {
        anyhow::bail!("Project name is required.");
    }
    service
        .initialize_project(options)
        .await
        .context("Failed to initialize project")?;
    println!("Project '{}' initialized successfully.", options.name);
    Ok(())
}

/// Open the project configuration for editing
#[tracing::instrument(skip(service))]
pub async fn edit<R: Runtime>(service: &ProjectService<R>) -> Result<()> {
    service
        .edit_configuration()
        .await
        .context("Failed to open configuration")?;
    println!("Configuration opened for editing.");
    Ok(())
}

/// Re-initialize the project
#[tracing::instrument(skip(service))]
pub async fn reinit<R: Runtime>(service: &ProjectService<R>) -> Result<()> {
    service
        .reinitialize_project()
        .await
        .context("Failed to re-initialize project")?;
    println!("Project re-initialized successfully.");
    Ok(())
}

/// Export the configuration as JSON, to `output` or to stdout
#[tracing::instrument(skip(runtime, service))]
pub async fn export<R: Runtime>(
    runtime: &R,
    service: &ProjectService<R>,
    output: Option<&Path>,
) -> Result<()> {
    let config = service.export_configuration().await?;
    let json = serde_json::to_string_pretty(&config)?;

    match output {
        Some(path) => {
            debug!("Writing configuration to {:?}", path);
            runtime
                .write(path, format!("{}\n", json).as_bytes())
                .context("Failed to export configuration")?;
            println!("Configuration exported to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Add a package to a feature
#[tracing::instrument(skip(service))]
pub async fn add<R: Runtime>(service: &ProjectService<R>, package: &str, feature: &str) -> Result<()> {
    let output = service.add_package(package, feature).await?;
    println!("{}", output);
    Ok(())
}

/// Run an arbitrary pixi command
#[tracing::instrument(skip(service))]
pub async fn exec<R: Runtime>(
    service: &ProjectService<R>,
    command: &str,
    args: &[String],
) -> Result<()> {
    let output = service.execute_command(command, args).await?;
    println!("{}", output);
    Ok(())
}
