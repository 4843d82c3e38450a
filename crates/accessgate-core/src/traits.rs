//! The dependency rule lookup trait.
//!
//! Two static tables drive resolution:
//!
//! - the Feature Dependency Table: granting anything in feature A forces
//!   the `READ` action of every feature A depends on
//! - the Action Dependency Table: granting one specific action forces
//!   specific actions of another feature
//!
//! The resolver only ever reads these tables through `DependencyRules`.

use accessgate_contracts::dependency::ActionRequirement;

/// Read-only access to the two dependency tables.
///
/// Implementations must be deterministic and cheap; the resolver calls them
/// many times per toggle. Unknown names return empty slices.
pub trait DependencyRules: Send + Sync {
    /// Features `feature` depends on directly.
    fn feature_dependencies(&self, feature: &str) -> &[String];

    /// Requirements declared for `action` of `feature`.
    fn action_requirements(&self, feature: &str, action: &str) -> &[ActionRequirement];

    /// Features that list `feature` among their direct dependencies.
    fn feature_dependents(&self, feature: &str) -> Vec<&str>;
}
