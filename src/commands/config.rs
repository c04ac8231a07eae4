use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;
use crate::service::ServiceOptions;

/// Variable pixi sets to the name of the active environment.
pub const ENVIRONMENT_NAME_VAR: &str = "PIXI_ENVIRONMENT_NAME";

/// Settings assembled from the command line and the process environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// JSON project snapshot to read instead of the demo catalog
    pub catalog_path: Option<PathBuf>,
    /// Skip the simulated operation delays
    pub no_delay: bool,
    /// Environment that replaces the catalog's current environment
    pub environment_override: Option<String>,
}

impl Config {
    pub fn new<R: Runtime>(runtime: &R, catalog_path: Option<PathBuf>, no_delay: bool) -> Self {
        let environment_override = runtime
            .env_var(ENVIRONMENT_NAME_VAR)
            .ok()
            .filter(|env| !env.trim().is_empty());
        if let Some(env) = &environment_override {
            debug!("Current environment overridden by {}: {}", ENVIRONMENT_NAME_VAR, env);
        }

        Self {
            catalog_path,
            no_delay,
            environment_override,
        }
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            simulate_latency: !self.no_delay,
            environment_override: self.environment_override.clone(),
        }
    }
}
