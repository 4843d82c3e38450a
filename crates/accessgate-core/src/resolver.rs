//! The permission dependency resolver.
//!
//! Every public operation maps one user gesture onto a new `SelectedSet`:
//!
//!   Toggle → Guard (locked / read-only / blocked removal) → Edit → Propagate
//!
//! Propagation closes the edited set under three rules:
//!
//! 1. A non-`READ` action forces the `READ` action of its own feature.
//! 2. Any action of feature A forces the `READ` action of every feature A
//!    depends on, transitively.
//! 3. An action with declared action dependencies forces the named actions
//!    of the required feature, and that feature's own dependencies.
//!
//! Invalid input never raises. An unknown id, a locked feature, a read-only
//! action or a refused removal all return the input set unchanged, and a
//! dependency edge naming something absent from the catalog is skipped. The
//! caller renders the returned set and nothing else.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use accessgate_contracts::{
    catalog::{Action, ActionId, Feature, PermissionCatalog},
    selection::SelectedSet,
};

use crate::traits::DependencyRules;

/// Tri-state of a feature's checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureSelection {
    None,
    Partial,
    All,
}

/// A stateless resolver over one catalog and one rule set.
///
/// Construct it wherever convenient; it only borrows its inputs and keeps
/// nothing between calls.
pub struct Resolver<'a> {
    catalog: &'a PermissionCatalog,
    rules: &'a dyn DependencyRules,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a PermissionCatalog, rules: &'a dyn DependencyRules) -> Self {
        Self { catalog, rules }
    }

    /// Toggle a single action checkbox.
    ///
    /// # Removal (the action is currently selected)
    ///
    /// - refused while another selected action declares an action
    ///   dependency on it (direct dependents only)
    /// - refused for a `READ` action while any other action of the same
    ///   feature is selected
    ///
    /// # Addition
    ///
    /// The action is added, and for a non-`READ` action the feature's own
    /// `READ` too. The result is then propagated.
    pub fn toggle_action(&self, id: &ActionId, selected: &SelectedSet) -> SelectedSet {
        let Some((feature, action)) = self.catalog.locate(id) else {
            debug!(action_id = %id, "toggle ignored: action not in catalog");
            return selected.clone();
        };

        if feature.is_locked() || action.read_only {
            debug!(
                action_id = %id,
                feature = %feature.name,
                locked = feature.is_locked(),
                read_only = action.read_only,
                "toggle ignored: action cannot be changed"
            );
            return selected.clone();
        }

        let mut next = selected.clone();

        if selected.contains(id) {
            if let Some(dependent) = self.selected_dependent(feature, action, selected) {
                debug!(
                    action_id = %id,
                    dependent = %dependent,
                    "removal refused: a selected action depends on it"
                );
                return selected.clone();
            }

            if action.is_read()
                && feature
                    .actions
                    .iter()
                    .any(|other| other.id != action.id && selected.contains(&other.id))
            {
                debug!(
                    action_id = %id,
                    feature = %feature.name,
                    "removal refused: READ is required by other selected actions"
                );
                return selected.clone();
            }

            next.remove(id);
            debug!(action_id = %id, feature = %feature.name, "action removed");
        } else {
            next.insert(id.clone());
            if !action.is_read() {
                if let Some(read) = feature.read_action() {
                    if !read.read_only {
                        next.insert(read.id.clone());
                    }
                }
            }
            debug!(action_id = %id, feature = %feature.name, "action added");
        }

        self.propagate(&next)
    }

    /// Toggle every toggleable action of `feature_name` at once.
    ///
    /// When all of them are selected they are all removed; otherwise they
    /// are all added. Read-only actions keep their state.
    pub fn toggle_feature(&self, feature_name: &str, selected: &SelectedSet) -> SelectedSet {
        let Some(feature) = self.catalog.feature(feature_name) else {
            debug!(feature = %feature_name, "feature toggle ignored: feature not in catalog");
            return selected.clone();
        };

        if feature.is_locked() {
            debug!(feature = %feature_name, "feature toggle ignored: feature is locked");
            return selected.clone();
        }

        let ids: Vec<&ActionId> = feature.toggleable_actions().map(|a| &a.id).collect();
        let mut next = selected.clone();

        if selected.contains_all(ids.iter().copied()) {
            for id in &ids {
                next.remove(id);
            }
            debug!(feature = %feature_name, count = ids.len(), "feature deselected");
        } else {
            next.extend(ids.iter().map(|id| (*id).clone()));
            debug!(feature = %feature_name, count = ids.len(), "feature selected");
        }

        self.propagate(&next)
    }

    /// Select or deselect everything the user is allowed to change.
    ///
    /// The universe is every non-read-only action of every unlocked
    /// feature. If it is already fully selected exactly those ids are
    /// removed; otherwise they are unioned in.
    pub fn toggle_all(&self, selected: &SelectedSet) -> SelectedSet {
        let universe = self.universe();
        let mut next = selected.clone();

        if selected.contains_all(universe.iter().copied()) {
            for id in &universe {
                next.remove(id);
            }
            debug!(count = universe.len(), "all actions deselected");
        } else {
            next.extend(universe.iter().map(|id| (*id).clone()));
            debug!(count = universe.len(), "all actions selected");
        }

        self.propagate(&next)
    }

    /// Close `selected` under every dependency rule.
    ///
    /// Runs to a fixed point: ids added along the way are propagated in
    /// turn, so the result of a second call equals the first. Ids in locked
    /// features and read-only actions are never added.
    pub fn propagate(&self, selected: &SelectedSet) -> SelectedSet {
        let mut next = selected.clone();
        let mut queue: VecDeque<ActionId> = selected.iter().cloned().collect();
        let mut processed: HashSet<ActionId> = HashSet::new();
        let mut visited: HashSet<&'a str> = HashSet::new();

        while let Some(id) = queue.pop_front() {
            if !processed.insert(id.clone()) {
                continue;
            }
            let Some((feature, action)) = self.catalog.locate(&id) else {
                continue;
            };

            let mut added = Vec::new();

            if !action.is_read() {
                if let Some(read) = feature.read_action() {
                    grant(feature, read, &mut next, &mut added);
                }
            }

            self.resolve_feature(&feature.name, &mut visited, &mut next, &mut added);

            for requirement in self.rules.action_requirements(&feature.name, &action.name) {
                match self.catalog.feature(&requirement.feature) {
                    Some(required) => {
                        for name in &requirement.actions {
                            match required.action(name) {
                                Some(target) => grant(required, target, &mut next, &mut added),
                                None => warn!(
                                    feature = %requirement.feature,
                                    action = %name,
                                    required_by = %id,
                                    "action dependency names an unknown action; skipping"
                                ),
                            }
                        }
                    }
                    None => warn!(
                        feature = %requirement.feature,
                        required_by = %id,
                        "action dependency names an unknown feature; skipping"
                    ),
                }
                self.resolve_feature(&requirement.feature, &mut visited, &mut next, &mut added);
            }

            queue.extend(added);
        }

        debug!(
            before = selected.len(),
            after = next.len(),
            "propagation reached fixed point"
        );
        next
    }

    /// Return true if `feature_name`'s `READ` is forced on because some
    /// other feature that depends on it has an action selected.
    ///
    /// Drives the disabled state of the READ checkbox; never mutates.
    pub fn is_read_disabled_by_dependency(&self, feature_name: &str, selected: &SelectedSet) -> bool {
        self.rules
            .feature_dependents(feature_name)
            .into_iter()
            .filter(|dependent| *dependent != feature_name)
            .filter_map(|dependent| self.catalog.feature(dependent))
            .any(|dependent| dependent.actions.iter().any(|a| selected.contains(&a.id)))
    }

    /// Tri-state of the feature checkbox over its toggleable actions.
    pub fn feature_selection(&self, feature_name: &str, selected: &SelectedSet) -> FeatureSelection {
        let Some(feature) = self.catalog.feature(feature_name) else {
            return FeatureSelection::None;
        };
        let total = feature.toggleable_actions().count();
        let chosen = feature
            .toggleable_actions()
            .filter(|a| selected.contains(&a.id))
            .count();

        match chosen {
            0 => FeatureSelection::None,
            n if n == total => FeatureSelection::All,
            _ => FeatureSelection::Partial,
        }
    }

    /// Return true if the select-all checkbox should render checked.
    pub fn is_all_selected(&self, selected: &SelectedSet) -> bool {
        let universe = self.universe();
        !universe.is_empty() && selected.contains_all(universe.into_iter())
    }

    /// Return true if the user may click the checkbox for `id`.
    pub fn is_action_interactive(&self, id: &ActionId, selected: &SelectedSet) -> bool {
        let Some((feature, action)) = self.catalog.locate(id) else {
            return false;
        };
        if feature.is_locked() || action.read_only {
            return false;
        }
        !(action.is_read() && self.is_read_disabled_by_dependency(&feature.name, selected))
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn universe(&self) -> Vec<&'a ActionId> {
        self.catalog
            .features()
            .iter()
            .filter(|f| !f.is_locked())
            .flat_map(|f| f.toggleable_actions().map(|a| &a.id))
            .collect()
    }

    /// First selected action, other than `action` itself, that declares an
    /// action dependency on `action`.
    fn selected_dependent(
        &self,
        feature: &Feature,
        action: &Action,
        selected: &SelectedSet,
    ) -> Option<&'a ActionId> {
        selected
            .iter()
            .filter(|other| **other != action.id)
            .filter_map(|other| self.catalog.locate(other))
            .find(|(other_feature, other_action)| {
                self.rules
                    .action_requirements(&other_feature.name, &other_action.name)
                    .iter()
                    .any(|req| req.names(&feature.name, &action.name))
            })
            .map(|(_, other_action)| &other_action.id)
    }

    /// Walk the Feature Dependency Table from `feature_name`, granting the
    /// `READ` of every dependency. `visited` guards against cycles.
    fn resolve_feature(
        &self,
        feature_name: &'a str,
        visited: &mut HashSet<&'a str>,
        next: &mut SelectedSet,
        added: &mut Vec<ActionId>,
    ) {
        if !visited.insert(feature_name) {
            return;
        }

        for dependency in self.rules.feature_dependencies(feature_name) {
            match self.catalog.feature(dependency) {
                Some(required) => {
                    if let Some(read) = required.read_action() {
                        grant(required, read, next, added);
                    }
                }
                None => warn!(
                    feature = %dependency,
                    required_by = %feature_name,
                    "feature dependency names an unknown feature; skipping"
                ),
            }
            self.resolve_feature(dependency, visited, next, added);
        }
    }
}

/// Insert `action` unless it is frozen, recording it for further propagation.
fn grant(feature: &Feature, action: &Action, next: &mut SelectedSet, added: &mut Vec<ActionId>) {
    if feature.is_locked() || action.read_only {
        return;
    }
    if next.insert(action.id.clone()) {
        added.push(action.id.clone());
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
