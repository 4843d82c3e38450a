//! TOML-driven dependency rules.
//!
//! `TomlDependencyRules` loads a `DependencyConfig` from a TOML string or file
//! and implements the `DependencyRules` trait from accessgate-core.
//!
//! Lookups never fail. A name with no entry has no dependencies, and an
//! entry naming something the catalog lacks is skipped by the resolver.
//! `validate` exists for callers that would rather reject such a table at
//! startup than have its edges silently dropped.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use accessgate_contracts::{
    catalog::{PermissionCatalog, READ_ACTION},
    dependency::ActionRequirement,
    error::{AccessError, AccessResult},
};
use accessgate_core::traits::DependencyRules;

use crate::rule::DependencyConfig;

/// A `DependencyRules` implementation backed by a TOML document.
///
/// ```rust,ignore
/// use accessgate_rules::TomlDependencyRules;
///
/// let rules = TomlDependencyRules::from_file(Path::new("config/crm_rules.toml"))?;
/// rules.validate(&catalog)?;
/// ```
#[derive(Debug)]
pub struct TomlDependencyRules {
    config: DependencyConfig,
    actions: HashMap<String, HashMap<String, Vec<ActionRequirement>>>,
    dependents: HashMap<String, Vec<String>>,
}

impl TomlDependencyRules {
    /// Parse `s` as TOML and build the lookup tables.
    ///
    /// Returns `AccessError::ConfigError` if the TOML is malformed or does
    /// not match the `DependencyConfig` schema.
    pub fn from_toml_str(s: &str) -> AccessResult<Self> {
        let config: DependencyConfig = toml::from_str(s).map_err(|e| AccessError::ConfigError {
            reason: format!("failed to parse dependency TOML: {}", e),
        })?;
        Ok(Self::from_config(config))
    }

    /// Read the file at `path` and parse it as TOML dependency configuration.
    pub fn from_file(path: &Path) -> AccessResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AccessError::ConfigError {
            reason: format!("failed to read dependency file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_config(config: DependencyConfig) -> Self {
        let mut actions: HashMap<String, HashMap<String, Vec<ActionRequirement>>> = HashMap::new();
        for rule in &config.actions {
            actions
                .entry(rule.feature.clone())
                .or_default()
                .entry(rule.action.clone())
                .or_default()
                .extend(rule.requires.iter().cloned());
        }

        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        for (feature, deps) in &config.features {
            for dep in deps {
                let entry = dependents.entry(dep.clone()).or_default();
                if !entry.contains(feature) {
                    entry.push(feature.clone());
                }
            }
        }

        debug!(
            feature_rules = config.features.len(),
            action_rules = config.actions.len(),
            "dependency rules loaded"
        );

        Self { config, actions, dependents }
    }

    pub fn config(&self) -> &DependencyConfig {
        &self.config
    }

    /// Check every name in both tables against `catalog`.
    ///
    /// Returns `AccessError::InvalidRules` carrying one `UnknownFeature` or
    /// `UnknownAction` per dangling reference. A feature another feature
    /// depends on must also define a `READ` action.
    pub fn validate(&self, catalog: &PermissionCatalog) -> AccessResult<()> {
        let mut problems = Vec::new();

        for (feature, deps) in &self.config.features {
            if catalog.feature(feature).is_none() {
                problems.push(AccessError::UnknownFeature {
                    feature: feature.clone(),
                    referenced_by: "the feature dependency table".to_string(),
                });
            }
            let referenced_by = format!("feature dependency of '{}'", feature);
            for dep in deps {
                check_action(catalog, dep, READ_ACTION, &referenced_by, &mut problems);
            }
        }

        for rule in &self.config.actions {
            check_action(
                catalog,
                &rule.feature,
                &rule.action,
                "the action dependency table",
                &mut problems,
            );
            let referenced_by = format!("action dependency of '{} / {}'", rule.feature, rule.action);
            for requirement in &rule.requires {
                for action in &requirement.actions {
                    check_action(catalog, &requirement.feature, action, &referenced_by, &mut problems);
                }
            }
        }

        if problems.is_empty() {
            return Ok(());
        }

        for problem in &problems {
            warn!(problem = %problem, "dependency rule references unknown catalog entry");
        }
        Err(AccessError::InvalidRules { problems })
    }
}

/// Record a problem unless `feature / action` exists in `catalog`.
///
/// A missing feature is reported once per reference, without also reporting
/// its action.
fn check_action(
    catalog: &PermissionCatalog,
    feature: &str,
    action: &str,
    referenced_by: &str,
    problems: &mut Vec<AccessError>,
) {
    match catalog.feature(feature) {
        None => problems.push(AccessError::UnknownFeature {
            feature: feature.to_string(),
            referenced_by: referenced_by.to_string(),
        }),
        Some(f) if f.action(action).is_none() => problems.push(AccessError::UnknownAction {
            feature: feature.to_string(),
            action: action.to_string(),
            referenced_by: referenced_by.to_string(),
        }),
        Some(_) => {}
    }
}

impl DependencyRules for TomlDependencyRules {
    fn feature_dependencies(&self, feature: &str) -> &[String] {
        self.config
            .features
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn action_requirements(&self, feature: &str, action: &str) -> &[ActionRequirement] {
        self.actions
            .get(feature)
            .and_then(|by_action| by_action.get(action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn feature_dependents(&self, feature: &str) -> Vec<&str> {
        self.dependents
            .get(feature)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
