//! # accessgate-rules
//!
//! TOML-driven feature and action dependency tables for the accessgate
//! resolver.
//!
//! ## Overview
//!
//! This crate provides [`TomlDependencyRules`], which implements the
//! [`DependencyRules`](accessgate_core::traits::DependencyRules) trait. Both
//! tables are declared in one TOML file and loaded once at startup.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use accessgate_rules::TomlDependencyRules;
//!
//! let rules = TomlDependencyRules::from_file(Path::new("config/crm_rules.toml"))?;
//! let resolver = accessgate_core::Resolver::new(&catalog, &rules);
//! ```
//!
//! ## File layout
//!
//! ```toml
//! [features]
//! Tasks = ["Leads", "Users"]
//!
//! [[actions]]
//! feature = "Flows"
//! action = "CONVERT TO TASK"
//! requires = [{ feature = "Tasks", actions = ["READ", "CREATE"] }]
//! ```

pub mod engine;
pub mod rule;

pub use engine::TomlDependencyRules;
pub use rule::{ActionRule, DependencyConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────
