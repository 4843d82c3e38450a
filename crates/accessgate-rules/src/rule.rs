//! Dependency table configuration schema.
//!
//! A `DependencyConfig` is deserialized from TOML and holds both static
//! tables. Feature names are free-form strings and may contain spaces, so
//! they are written as quoted keys where needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use accessgate_contracts::dependency::ActionRequirement;

/// One row of the Action Dependency Table.
///
/// Example in TOML:
/// ```toml
/// [[actions]]
/// feature = "Flows"
/// action = "CONVERT TO TASK"
/// requires = [{ feature = "Tasks", actions = ["READ", "CREATE"] }]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRule {
    /// Feature owning the action this rule applies to.
    pub feature: String,

    /// Operation name of the action, e.g. `"CONVERT TO TASK"`.
    pub action: String,

    /// Actions that must be granted alongside it.
    #[serde(default)]
    pub requires: Vec<ActionRequirement>,
}

/// The top-level structure deserialized from a TOML dependency file.
///
/// Example:
/// ```toml
/// [features]
/// Tasks = ["Leads", "Users"]
/// "Access Groups" = ["Users"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Feature Dependency Table: feature name → features it depends on.
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,

    /// Action Dependency Table rows. Repeated (feature, action) pairs
    /// accumulate their requirements in declaration order.
    #[serde(default)]
    pub actions: Vec<ActionRule>,
}
