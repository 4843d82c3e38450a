//! Action-level dependency entries.

use serde::{Deserialize, Serialize};

/// One requirement of an action: granting it also grants the named actions
/// of `feature`.
///
/// Example: `Flows / CONVERT TO TASK` requires
/// `ActionRequirement { feature: "Tasks", actions: ["READ", "CREATE"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequirement {
    pub feature: String,
    pub actions: Vec<String>,
}

impl ActionRequirement {
    /// Return true if this requirement names `action` of `feature`.
    pub fn names(&self, feature: &str, action: &str) -> bool {
        self.feature == feature && self.actions.iter().any(|a| a == action)
    }
}
