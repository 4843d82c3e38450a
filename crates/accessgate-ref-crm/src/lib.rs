//! # accessgate-ref-crm
//!
//! Reference configuration for the CRM dashboard's access group editor.
//!
//! Ships the built-in permission catalog (JSON) and the two dependency
//! tables (TOML), both embedded at compile time, plus a narrated
//! walkthrough of the resolver's behavior against them:
//!
//! 1. **Grant with dependencies** - `Tasks / CREATE` pulls in Tasks READ,
//!    Leads READ and Users READ.
//! 2. **Blocked removal** - Leads READ stays while Tasks is granted.
//! 3. **Action dependency** - `Flows / CONVERT TO TASK` grants Tasks READ
//!    and CREATE.
//! 4. **Select all** - the locked Billing feature contributes nothing.

use accessgate_contracts::{catalog::PermissionCatalog, error::AccessResult};
use accessgate_rules::TomlDependencyRules;

pub mod walkthrough;

/// The CRM dashboard's permission catalog.
pub const CRM_CATALOG: &str = include_str!("../config/crm_catalog.json");

/// The CRM dashboard's feature and action dependency tables.
pub const CRM_RULES: &str = include_str!("../config/crm_rules.toml");

/// Parse the embedded catalog.
pub fn catalog() -> AccessResult<PermissionCatalog> {
    PermissionCatalog::from_json_str(CRM_CATALOG)
}

/// Parse the embedded dependency tables.
pub fn rules() -> AccessResult<TomlDependencyRules> {
    TomlDependencyRules::from_toml_str(CRM_RULES)
}
