//! Environment to package/feature resolution.
//!
//! Pure functions over a [`Catalog`] snapshot. Lookup failures never raise:
//! an unknown environment resolves to nothing and unknown feature references
//! are skipped.

use std::collections::HashSet;

use log::debug;

use super::{Catalog, DEFAULT_ENVIRONMENT, Feature, Package};

/// Resolve the packages visible in `environment`.
///
/// Packages come from each referenced feature in declared order. Unless the
/// environment opts out (or is the default environment itself), the default
/// feature's packages are appended last. The result is deduplicated by name,
/// first occurrence wins.
pub fn resolve_packages(catalog: &Catalog, environment: &str) -> Vec<Package> {
    let Some(env) = catalog.environment(environment) else {
        debug!("Environment {:?} not found, no packages", environment);
        return Vec::new();
    };

    let mut packages: Vec<Package> = Vec::new();
    for feature_name in &env.features {
        match catalog.feature(feature_name) {
            Some(feature) => packages.extend(feature.packages.iter().cloned()),
            None => debug!(
                "Skipping unknown feature {:?} referenced by {:?}",
                feature_name, env.name
            ),
        }
    }

    if env.inherits_default() && env.name != DEFAULT_ENVIRONMENT {
        if let Some(default_feature) = catalog.default_feature() {
            debug!(
                "Environment {:?} inherits default feature {:?}",
                env.name, default_feature.name
            );
            packages.extend(default_feature.packages.iter().cloned());
        }
    }

    dedup_by_name(packages)
}

/// Resolve the features referenced by `environment`, in declared order.
///
/// Unlike [`resolve_packages`], the default feature is not added implicitly.
pub fn resolve_features(catalog: &Catalog, environment: &str) -> Vec<Feature> {
    let Some(env) = catalog.environment(environment) else {
        debug!("Environment {:?} not found, no features", environment);
        return Vec::new();
    };

    env.features
        .iter()
        .filter_map(|name| catalog.feature(name))
        .cloned()
        .collect()
}

/// Drop packages whose name was already seen, keeping the original order.
pub fn dedup_by_name(packages: Vec<Package>) -> Vec<Package> {
    let mut seen = HashSet::new();
    packages
        .into_iter()
        .filter(|p| seen.insert(p.name.clone()))
        .collect()
}
