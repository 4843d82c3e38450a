//! Narrated walkthrough of the resolver against the CRM reference config.
//!
//! Each step starts from a known selection, applies one toggle and prints
//! the set the editor would render next.

use tracing::info;

use accessgate_contracts::{catalog::ActionId, error::AccessResult, selection::SelectedSet};
use accessgate_core::Resolver;

use crate::{catalog, rules};

/// Run every walkthrough step and print the outcome of each.
pub fn run_walkthrough() -> AccessResult<()> {
    let catalog = catalog()?;
    let rules = rules()?;
    rules.validate(&catalog)?;
    let resolver = Resolver::new(&catalog, &rules);

    info!(features = catalog.features().len(), "reference catalog loaded");

    println!("--- Step 1: Grant Tasks / CREATE ------------------------------");
    let start = SelectedSet::new();
    let granted = resolver.toggle_action(&ActionId::new("tasks.create"), &start);
    print_set("  Before", &start);
    print_set("  After ", &granted);
    println!("  Tasks depends on Leads and Users, so both READs are forced on.");
    println!();

    println!("--- Step 2: Try to remove Leads / READ ------------------------");
    let attempt = resolver.toggle_action(&ActionId::new("leads.read"), &granted);
    print_set("  After ", &attempt);
    println!(
        "  Unchanged: {}  |  Leads READ forced by dependency: {}",
        if attempt == granted { "yes" } else { "NO" },
        resolver.is_read_disabled_by_dependency("Leads", &attempt)
    );
    println!();

    println!("--- Step 3: Grant Flows / CONVERT TO TASK ---------------------");
    let converted = resolver.toggle_action(&ActionId::new("flows.convert_to_task"), &start);
    print_set("  After ", &converted);
    println!("  The action dependency grants Tasks READ and CREATE.");
    let blocked = resolver.toggle_action(&ActionId::new("tasks.create"), &converted);
    println!(
        "  Removing Tasks / CREATE while the flow action is granted: {}",
        if blocked == converted { "refused" } else { "ALLOWED" }
    );
    println!();

    println!("--- Step 4: Select all ----------------------------------------");
    let all = resolver.toggle_all(&start);
    println!("  Selected {} action(s); Billing is locked and contributes none.", all.len());
    println!("  Billing READ selected: {}", all.contains(&ActionId::new("billing.read")));
    let cleared = resolver.toggle_all(&all);
    println!("  Select all again clears {} action(s).", all.len() - cleared.len());
    println!();

    println!("Walkthrough complete.");
    println!();

    Ok(())
}

fn print_set(label: &str, set: &SelectedSet) {
    let ids: Vec<&str> = set.iter().map(ActionId::as_str).collect();
    println!("{}: [{}]", label, ids.join(", "));
}
