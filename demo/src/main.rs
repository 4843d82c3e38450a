//! accessgate - permission dependency resolver CLI
//!
//! Drives the resolver from a catalog JSON file and a dependency TOML file,
//! falling back to the embedded CRM reference configuration when either is
//! omitted.
//!
//! Usage:
//!   cargo run -p demo -- walkthrough
//!   cargo run -p demo -- resolve action:tasks.create feature:Leads
//!   cargo run -p demo -- resolve --selected leads.read,tasks.read all
//!   cargo run -p demo -- validate --catalog catalog.json --rules rules.toml
//!   cargo run -p demo -- filter task
//!   cargo run -p demo -- disabled-reads --selected tasks.create

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use accessgate_contracts::{
    catalog::{ActionId, PermissionCatalog},
    error::{AccessError, AccessResult},
    selection::SelectedSet,
};
use accessgate_core::{filter_permissions, Resolver};
use accessgate_ref_crm::walkthrough;
use accessgate_rules::TomlDependencyRules;

// ── CLI definition ────────────────────────────────────────────────────────────

/// accessgate - resolve access group permission selections.
#[derive(Parser)]
#[command(
    name = "accessgate",
    about = "Permission dependency resolver for access group editors",
    long_about = "Applies checkbox toggles to a permission selection and prints the\n\
                  fully propagated result, using feature and action dependency tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the narrated walkthrough against the reference CRM configuration.
    Walkthrough,
    /// Apply operations in order and print the resulting selection as JSON.
    Resolve {
        #[command(flatten)]
        source: Source,
        /// Starting selection as comma-separated action ids.
        #[arg(long, value_delimiter = ',')]
        selected: Vec<String>,
        /// Operations: `action:<id>`, `feature:<name>`, `all`, `propagate`.
        #[arg(required = true)]
        ops: Vec<Operation>,
    },
    /// Check the dependency tables against the catalog.
    Validate {
        #[command(flatten)]
        source: Source,
    },
    /// List feature names matching a case-insensitive search.
    Filter {
        #[arg(long)]
        catalog: Option<PathBuf>,
        query: String,
    },
    /// List features whose READ is forced on by a dependent feature.
    DisabledReads {
        #[command(flatten)]
        source: Source,
        /// Selection as comma-separated action ids.
        #[arg(long, value_delimiter = ',')]
        selected: Vec<String>,
    },
}

#[derive(Args)]
struct Source {
    /// Catalog JSON file (defaults to the embedded CRM catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Dependency TOML file (defaults to the embedded CRM rules).
    #[arg(long)]
    rules: Option<PathBuf>,
}

/// One resolver operation named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Action(String),
    Feature(String),
    All,
    Propagate,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("action", id)) if !id.is_empty() => Ok(Self::Action(id.to_string())),
            Some(("feature", name)) if !name.is_empty() => Ok(Self::Feature(name.to_string())),
            None if s == "all" => Ok(Self::All),
            None if s == "propagate" => Ok(Self::Propagate),
            _ => Err(format!(
                "unknown operation '{}': expected action:<id>, feature:<name>, all or propagate",
                s
            )),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Walkthrough => walkthrough::run_walkthrough(),
        Command::Resolve { source, selected, ops } => run_resolve(&source, &selected, &ops),
        Command::Validate { source } => run_validate(&source),
        Command::Filter { catalog, query } => run_filter(catalog.as_deref(), &query),
        Command::DisabledReads { source, selected } => run_disabled_reads(&source, &selected),
    };

    if let Err(e) = result {
        eprintln!("accessgate error: {}", e);
        if let AccessError::InvalidRules { problems } = &e {
            for problem in problems {
                eprintln!("  - {}", problem);
            }
        }
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_resolve(source: &Source, selected: &[String], ops: &[Operation]) -> AccessResult<()> {
    let catalog = load_catalog(source.catalog.as_deref())?;
    let rules = load_rules(source.rules.as_deref())?;
    let resolver = Resolver::new(&catalog, &rules);

    let mut current = selection(selected);
    for op in ops {
        current = apply(&resolver, op, &current);
        debug!(operation = ?op, selected = current.len(), "operation applied");
    }

    let json = serde_json::to_string_pretty(&current).map_err(|e| AccessError::ConfigError {
        reason: format!("failed to encode selection: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

fn run_validate(source: &Source) -> AccessResult<()> {
    let catalog = load_catalog(source.catalog.as_deref())?;
    let rules = load_rules(source.rules.as_deref())?;
    rules.validate(&catalog)?;
    println!(
        "OK: {} feature rule(s) and {} action rule(s) match the catalog.",
        rules.config().features.len(),
        rules.config().actions.len()
    );
    Ok(())
}

fn run_filter(catalog: Option<&Path>, query: &str) -> AccessResult<()> {
    let catalog = load_catalog(catalog)?;
    for feature in filter_permissions(&catalog, query) {
        println!("{}", feature.name);
    }
    Ok(())
}

fn run_disabled_reads(source: &Source, selected: &[String]) -> AccessResult<()> {
    let catalog = load_catalog(source.catalog.as_deref())?;
    let rules = load_rules(source.rules.as_deref())?;
    let resolver = Resolver::new(&catalog, &rules);
    let selected = selection(selected);

    for feature in catalog.features() {
        if resolver.is_read_disabled_by_dependency(&feature.name, &selected) {
            println!("{}", feature.name);
        }
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn apply(resolver: &Resolver<'_>, op: &Operation, selected: &SelectedSet) -> SelectedSet {
    match op {
        Operation::Action(id) => resolver.toggle_action(&ActionId::new(id.as_str()), selected),
        Operation::Feature(name) => resolver.toggle_feature(name, selected),
        Operation::All => resolver.toggle_all(selected),
        Operation::Propagate => resolver.propagate(selected),
    }
}

fn selection(ids: &[String]) -> SelectedSet {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ActionId::new)
        .collect()
}

fn load_catalog(path: Option<&Path>) -> AccessResult<PermissionCatalog> {
    match path {
        Some(path) => PermissionCatalog::from_json_file(path),
        None => accessgate_ref_crm::catalog(),
    }
}

fn load_rules(path: Option<&Path>) -> AccessResult<TomlDependencyRules> {
    match path {
        Some(path) => TomlDependencyRules::from_file(path),
        None => accessgate_ref_crm::rules(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn operation_parses_every_form() {
        assert_eq!(
            "action:tasks.create".parse::<Operation>().unwrap(),
            Operation::Action("tasks.create".to_string())
        );
        assert_eq!(
            "feature:Access Groups".parse::<Operation>().unwrap(),
            Operation::Feature("Access Groups".to_string())
        );
        assert_eq!("all".parse::<Operation>().unwrap(), Operation::All);
        assert_eq!("propagate".parse::<Operation>().unwrap(), Operation::Propagate);
    }

    #[test]
    fn operation_rejects_unknown_forms() {
        for bad in ["", "action:", "toggle:x", "everything"] {
            let err = bad.parse::<Operation>().unwrap_err();
            assert!(err.contains("unknown operation"), "got: {err}");
        }
    }

    #[test]
    fn resolve_applies_operations_in_order() {
        let catalog = accessgate_ref_crm::catalog().unwrap();
        let rules = accessgate_ref_crm::rules().unwrap();
        let resolver = Resolver::new(&catalog, &rules);

        let ops = [
            Operation::Action("leads.create".to_string()),
            Operation::Action("leads.create".to_string()),
        ];
        let mut current = SelectedSet::new();
        for op in &ops {
            current = apply(&resolver, op, &current);
        }
        assert_eq!(current, selection(&["leads.read".to_string()]));
    }

    #[test]
    fn cli_parses_selected_list() {
        let cli = Cli::try_parse_from([
            "accessgate",
            "resolve",
            "--selected",
            "leads.read,tasks.read",
            "all",
        ])
        .unwrap();

        match cli.command {
            Command::Resolve { selected, ops, source } => {
                assert_eq!(selected, vec!["leads.read", "tasks.read"]);
                assert_eq!(ops, vec![Operation::All]);
                assert!(source.catalog.is_none());
                assert!(source.rules.is_none());
            }
            _ => panic!("expected resolve command"),
        }
    }
}
