//! # accessgate-contracts
//!
//! Shared types and errors for the accessgate permission resolver.
//!
//! All crates in the workspace import from here. No resolution logic lives in
//! this crate, only the catalog shapes, the selected set and error types.

pub mod catalog;
pub mod dependency;
pub mod error;
pub mod selection;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ActionId, PermissionCatalog};
    use error::AccessError;
    use selection::SelectedSet;

    const CATALOG_JSON: &str = r#"[
        {
            "name": "Leads",
            "actions": [
                { "id": "r1", "name": "READ" },
                { "id": "c1", "name": "CREATE" },
                { "id": "x1", "name": "EXPORT", "readOnly": true }
            ]
        },
        {
            "name": "Billing",
            "isAllowed": false,
            "actions": [
                { "id": "rb", "name": "READ" }
            ]
        }
    ]"#;

    // ── PermissionCatalog ────────────────────────────────────────────────────

    #[test]
    fn catalog_parses_camel_case_flags() {
        let catalog = PermissionCatalog::from_json_str(CATALOG_JSON).unwrap();

        let leads = catalog.feature("Leads").unwrap();
        assert!(!leads.is_locked());
        assert_eq!(leads.actions.len(), 3);
        assert!(leads.action("EXPORT").unwrap().read_only);
        assert!(!leads.action("CREATE").unwrap().read_only);

        let billing = catalog.feature("Billing").unwrap();
        assert!(billing.is_locked());
    }

    #[test]
    fn catalog_locate_resolves_owner() {
        let catalog = PermissionCatalog::from_json_str(CATALOG_JSON).unwrap();

        let (feature, action) = catalog.locate(&ActionId::new("c1")).unwrap();
        assert_eq!(feature.name, "Leads");
        assert_eq!(action.name, "CREATE");

        assert!(catalog.locate(&ActionId::new("nope")).is_none());
    }

    #[test]
    fn catalog_read_id_lookup() {
        let catalog = PermissionCatalog::from_json_str(CATALOG_JSON).unwrap();

        assert_eq!(catalog.read_id("Leads"), Some(&ActionId::new("r1")));
        assert_eq!(catalog.read_id("Missing"), None);
        assert_eq!(catalog.action_id("Leads", "DELETE"), None);
    }

    #[test]
    fn catalog_duplicate_id_first_definition_wins() {
        let catalog = PermissionCatalog::from_json_str(
            r#"[
                { "name": "A", "actions": [{ "id": "dup", "name": "READ" }] },
                { "name": "B", "actions": [{ "id": "dup", "name": "CREATE" }] }
            ]"#,
        )
        .unwrap();

        let (feature, _) = catalog.locate(&ActionId::new("dup")).unwrap();
        assert_eq!(feature.name, "A");
    }

    #[test]
    fn catalog_preserves_feature_order_on_serialize() {
        let catalog = PermissionCatalog::from_json_str(CATALOG_JSON).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();

        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Leads", "Billing"]);
    }

    #[test]
    fn catalog_parse_error_is_catalog_error() {
        match PermissionCatalog::from_json_str("{ not json") {
            Err(AccessError::CatalogError { reason }) => {
                assert!(reason.contains("failed to parse catalog JSON"), "got: {reason}");
            }
            other => panic!("expected CatalogError, got {:?}", other),
        }
    }

    // ── SelectedSet ──────────────────────────────────────────────────────────

    #[test]
    fn selected_set_serializes_as_sorted_array() {
        let set: SelectedSet = ["c2", "a1", "b9"].iter().map(|s| ActionId::new(*s)).collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a1","b9","c2"]"#);

        let decoded: SelectedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, set);
    }

    #[test]
    fn selected_set_insert_and_remove_report_changes() {
        let mut set = SelectedSet::new();
        assert!(set.insert(ActionId::new("r1")));
        assert!(!set.insert(ActionId::new("r1")));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&ActionId::new("r1")));
        assert!(!set.remove(&ActionId::new("r1")));
        assert!(set.is_empty());
    }

    // ── AccessError display messages ─────────────────────────────────────────

    #[test]
    fn error_unknown_feature_display() {
        let err = AccessError::UnknownFeature {
            feature: "Leeds".to_string(),
            referenced_by: "feature dependency of 'Tasks'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Leeds"));
        assert!(msg.contains("Tasks"));
    }

    #[test]
    fn error_invalid_rules_counts_problems() {
        let err = AccessError::InvalidRules {
            problems: vec![
                AccessError::ConfigError { reason: "a".to_string() },
                AccessError::ConfigError { reason: "b".to_string() },
            ],
        };
        assert!(err.to_string().contains("2 unknown catalog entries"));
    }
}
