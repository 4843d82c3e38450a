//! Permission catalog types.
//!
//! A catalog is the ordered list of features shown in an access group editor.
//! Each feature groups the actions that can be granted for it. The catalog is
//! read-only input to the resolver and is never mutated by it.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, AccessResult};

/// Name of the action every other action of a feature implies.
pub const READ_ACTION: &str = "READ";

/// Opaque identifier of a single grantable action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single grantable operation inside a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,

    /// Operation label such as `READ`, `CREATE` or `EXPORT`.
    pub name: String,

    /// When true the user can never toggle this action; it always keeps
    /// whatever state it was loaded with.
    #[serde(default)]
    pub read_only: bool,
}

impl Action {
    pub fn is_read(&self) -> bool {
        self.name == READ_ACTION
    }
}

/// A named capability grouping a list of actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub name: String,
    pub actions: Vec<Action>,

    /// `Some(false)` locks the whole feature. Absent means allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_allowed: Option<bool>,
}

impl Feature {
    /// Return true if the feature is marked `isAllowed: false`.
    pub fn is_locked(&self) -> bool {
        self.is_allowed == Some(false)
    }

    /// Look up an action of this feature by its operation name.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// The feature's `READ` action, if it defines one.
    pub fn read_action(&self) -> Option<&Action> {
        self.action(READ_ACTION)
    }

    /// Actions the user may toggle (everything not marked read-only).
    pub fn toggleable_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| !a.read_only)
    }
}

/// The full ordered list of features for one editing context.
///
/// Holds a precomputed `ActionId` index so owner lookups do not scan the
/// catalog. When an id is defined twice, the first definition owns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Feature>", into = "Vec<Feature>")]
pub struct PermissionCatalog {
    features: Vec<Feature>,
    by_id: HashMap<ActionId, (usize, usize)>,
    by_name: HashMap<String, usize>,
}

impl PermissionCatalog {
    pub fn new(features: Vec<Feature>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for (fi, feature) in features.iter().enumerate() {
            by_name.entry(feature.name.clone()).or_insert(fi);
            for (ai, action) in feature.actions.iter().enumerate() {
                by_id.entry(action.id.clone()).or_insert((fi, ai));
            }
        }
        Self { features, by_id, by_name }
    }

    /// Parse a JSON array of features.
    ///
    /// Returns `AccessError::CatalogError` if the document is not valid JSON
    /// or does not match the feature schema.
    pub fn from_json_str(s: &str) -> AccessResult<Self> {
        serde_json::from_str(s).map_err(|e| AccessError::CatalogError {
            reason: format!("failed to parse catalog JSON: {}", e),
        })
    }

    /// Read the file at `path` and parse it as a JSON catalog.
    pub fn from_json_file(path: &Path) -> AccessResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AccessError::CatalogError {
            reason: format!("failed to read catalog file '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.by_name.get(name).map(|&fi| &self.features[fi])
    }

    /// Resolve the feature owning `id` together with the action itself.
    pub fn locate(&self, id: &ActionId) -> Option<(&Feature, &Action)> {
        self.by_id.get(id).map(|&(fi, ai)| {
            let feature = &self.features[fi];
            (feature, &feature.actions[ai])
        })
    }

    /// The id of the action named `action` in feature `feature`.
    pub fn action_id(&self, feature: &str, action: &str) -> Option<&ActionId> {
        self.feature(feature)?.action(action).map(|a| &a.id)
    }

    /// The id of `feature`'s `READ` action.
    pub fn read_id(&self, feature: &str) -> Option<&ActionId> {
        self.action_id(feature, READ_ACTION)
    }
}

impl From<Vec<Feature>> for PermissionCatalog {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

impl From<PermissionCatalog> for Vec<Feature> {
    fn from(catalog: PermissionCatalog) -> Self {
        catalog.features
    }
}
