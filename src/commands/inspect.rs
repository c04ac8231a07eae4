//! Read-only commands: project info, packages, features and tasks.

use anyhow::Result;
use log::debug;

use crate::project::{Environment, Feature, Package, ProjectInfo, Task};
use crate::runtime::Runtime;
use crate::service::ProjectService;

pub(crate) fn format_package(package: &Package) -> String {
    let mut line = package.name.clone();
    if let Some(version) = &package.version {
        line.push(' ');
        line.push_str(version);
    }
    if let Some(channel) = &package.channel {
        line.push_str(&format!(" ({})", channel));
    }
    line
}

fn format_environment(env: &Environment, current: Option<&str>) -> String {
    let marker = if Some(env.name.as_str()) == current {
        "* "
    } else {
        "  "
    };
    let mut line = format!("{}{} [{}]", marker, env.name, env.features.join(", "));
    if !env.inherits_default() {
        line.push_str(" (no default inheritance)");
    }
    line
}

fn format_feature(feature: &Feature) -> String {
    let packages: Vec<String> = feature.packages.iter().map(format_package).collect();
    let label = if feature.is_default {
        format!("{} (default)", feature.name)
    } else {
        feature.name.clone()
    };
    format!("  {}: {}", label, packages.join(", "))
}

pub(crate) fn format_task(task: &Task) -> String {
    if task.description.is_empty() {
        format!("  {}", task.name)
    } else {
        format!("  {} - {}", task.name, task.description)
    }
}

pub(crate) fn render_info(info: &ProjectInfo) -> Vec<String> {
    if !info.is_pixi_project {
        return vec!["Not a pixi project.".to_string()];
    }

    let mut lines = vec![
        format!("Project: {}", info.name.as_deref().unwrap_or("(unknown)")),
        format!(
            "Current environment: {}",
            info.current_environment.as_deref().unwrap_or("(unknown)")
        ),
        String::new(),
        "Environments:".to_string(),
    ];
    lines.extend(
        info.environments
            .iter()
            .map(|env| format_environment(env, info.current_environment.as_deref())),
    );
    lines.push(String::new());
    lines.push("Features:".to_string());
    lines.extend(info.features.iter().map(format_feature));
    lines
}

/// Show the project overview
#[tracing::instrument(skip(service))]
pub async fn info<R: Runtime>(service: &ProjectService<R>) -> Result<()> {
    let info = service.get_project_info().await;
    for line in render_info(&info) {
        println!("{}", line);
    }
    Ok(())
}

/// List the packages of an environment (the current one by default)
#[tracing::instrument(skip(service))]
pub async fn packages<R: Runtime>(
    service: &ProjectService<R>,
    environment: Option<&str>,
) -> Result<()> {
    let packages = service.get_installed_packages(environment).await;
    debug!("Resolved {} package(s)", packages.len());

    if packages.is_empty() {
        println!("No packages found.");
        return Ok(());
    }

    for package in &packages {
        println!("{}", format_package(package));
    }
    Ok(())
}

/// List the features an environment is composed of
#[tracing::instrument(skip(service))]
pub async fn features<R: Runtime>(service: &ProjectService<R>, environment: &str) -> Result<()> {
    let features = service.get_features_for_environment(environment).await;

    if features.is_empty() {
        println!("No features found for environment {}.", environment);
        return Ok(());
    }

    for feature in &features {
        println!("{}", format_feature(feature));
    }
    Ok(())
}

/// List the available tasks
#[tracing::instrument(skip(service))]
pub async fn tasks<R: Runtime>(service: &ProjectService<R>) -> Result<()> {
    let tasks = service.get_available_tasks().await;

    if tasks.is_empty() {
        println!("No tasks defined.");
        return Ok(());
    }

    for task in &tasks {
        println!("{}", format_task(task));
    }
    Ok(())
}
