//! Error types for loading and validating permission configuration.
//!
//! Only the loading side of accessgate is fallible. The resolver operations
//! themselves are total: an unknown id, a locked feature or a blocked removal
//! all degrade to returning the input selection unchanged.

use thiserror::Error;

/// The unified error type for the accessgate crates.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A dependency table document is missing, unreadable or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A permission catalog document is missing, unreadable or malformed.
    #[error("catalog error: {reason}")]
    CatalogError { reason: String },

    /// A dependency rule names a feature the catalog does not contain.
    #[error("feature '{feature}' referenced by {referenced_by} is not in the catalog")]
    UnknownFeature { feature: String, referenced_by: String },

    /// A dependency rule names an action its feature does not define.
    #[error("action '{action}' of feature '{feature}' referenced by {referenced_by} is not in the catalog")]
    UnknownAction {
        feature: String,
        action: String,
        referenced_by: String,
    },

    /// Validation found one or more dangling references.
    #[error("dependency rules reference {} unknown catalog entries", .problems.len())]
    InvalidRules { problems: Vec<AccessError> },
}

/// Convenience alias used throughout the accessgate crates.
pub type AccessResult<T> = Result<T, AccessError>;
