//! Feature-name search for the permission editor.

use accessgate_contracts::catalog::{Feature, PermissionCatalog};

/// Return the features whose name contains `search`, ignoring case.
///
/// Catalog order is preserved. A blank search returns every feature.
pub fn filter_permissions<'c>(catalog: &'c PermissionCatalog, search: &str) -> Vec<&'c Feature> {
    let needle = search.trim().to_lowercase();
    catalog
        .features()
        .iter()
        .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use accessgate_contracts::catalog::{Action, ActionId, Feature, PermissionCatalog};

    use super::filter_permissions;

    fn feature(name: &str) -> Feature {
        Feature {
            name: name.to_string(),
            actions: vec![Action {
                id: ActionId::new(format!("{}-read", name)),
                name: "READ".to_string(),
                read_only: false,
            }],
            is_allowed: None,
        }
    }

    fn catalog() -> PermissionCatalog {
        PermissionCatalog::new(vec![
            feature("Leads"),
            feature("Tasks"),
            feature("Access Groups"),
            feature("Task Boards"),
        ])
    }

    fn names(features: &[&Feature]) -> Vec<String> {
        features.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let catalog = catalog();
        let found = filter_permissions(&catalog, "TASK");
        assert_eq!(names(&found), vec!["Tasks", "Task Boards"]);
    }

    #[test]
    fn test_filter_matches_inside_name() {
        let catalog = catalog();
        let found = filter_permissions(&catalog, "group");
        assert_eq!(names(&found), vec!["Access Groups"]);
    }

    #[test]
    fn test_blank_search_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(filter_permissions(&catalog, "").len(), 4);
        assert_eq!(
            names(&filter_permissions(&catalog, "   ")),
            vec!["Leads", "Tasks", "Access Groups", "Task Boards"]
        );
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = catalog();
        assert!(filter_permissions(&catalog, "billing").is_empty());
    }
}
