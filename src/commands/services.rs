//! Service factory for building the project service from configuration.

use std::sync::Arc;

use log::debug;

use crate::{
    catalog::{CatalogProvider, DemoCatalog, FileCatalog},
    runtime::Runtime,
    service::{ProjectService, SimulatedRunner},
};

use super::config::Config;

/// Build the catalog named by the configuration, falling back to the demo catalog
pub fn build_catalog<R: Runtime + 'static>(
    runtime: Arc<R>,
    config: &Config,
) -> Arc<dyn CatalogProvider> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = FileCatalog::new(runtime, path.clone());
            debug!("Using project snapshot at {:?}", catalog.path());
            Arc::new(catalog)
        }
        None => {
            debug!("Using demo catalog");
            Arc::new(DemoCatalog::new())
        }
    }
}

/// Build the project service
pub fn build_service<R: Runtime + 'static>(runtime: Arc<R>, config: &Config) -> ProjectService<R> {
    let catalog = build_catalog(runtime.clone(), config);
    ProjectService::new(
        runtime,
        catalog,
        Arc::new(SimulatedRunner),
        config.service_options(),
    )
}
