//! # accessgate-core
//!
//! The permission dependency resolver.
//!
//! This crate provides:
//! - The `DependencyRules` trait, the seam between where the static
//!   dependency tables live and how they are applied
//! - The `Resolver`, which turns a toggle on a checkbox into a new, fully
//!   consistent `SelectedSet`
//! - `filter_permissions`, the feature-name search used by the editor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use accessgate_core::Resolver;
//!
//! let resolver = Resolver::new(&catalog, &rules);
//! let next = resolver.toggle_action(&ActionId::new("c2"), &selected);
//! ```

pub mod filter;
pub mod resolver;
pub mod traits;

pub use filter::filter_permissions;
pub use resolver::{FeatureSelection, Resolver};
