//! Filter table management commands.
//!
//! Provides commands to list, show, copy, check and delete filter tables.

use super::common::load_table;
use clap::{Args, Subcommand};
use sigsweep_config::{
    FilterTable, SignalConfig, ensure_user_tables_dir, factory_tables, is_factory_table,
    list_user_tables, table_name_from_path, user_config_dir, user_tables_dir, validate_table,
};

#[derive(Args)]
pub struct TablesArgs {
    #[command(subcommand)]
    command: TablesCommand,
}

#[derive(Subcommand)]
enum TablesCommand {
    /// List available tables (factory and user)
    List {
        /// Show only factory tables
        #[arg(long)]
        factory: bool,

        /// Show only user tables
        #[arg(long)]
        user: bool,
    },

    /// Show the operations a table runs per signal
    Show {
        /// Table name or path
        name: String,
    },

    /// Check a table for invalid entries
    Check {
        /// Table name or path
        name: String,
    },

    /// Copy a table into the user tables directory for editing
    Copy {
        /// Source table name or path
        source: String,

        /// New table name (optional, uses source name if not specified)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite if the table already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user table
    Delete {
        /// Table name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Show table directories
    Paths,
}

pub fn run(args: TablesArgs) -> anyhow::Result<()> {
    match args.command {
        TablesCommand::List { factory, user } => list_tables(factory, user),
        TablesCommand::Show { name } => show_table(&name),
        TablesCommand::Check { name } => check_table(&name),
        TablesCommand::Copy {
            source,
            name,
            force,
        } => copy_table(&source, name.as_deref(), force),
        TablesCommand::Delete { name, force } => delete_table(&name, force),
        TablesCommand::Paths => show_paths(),
    }
}

fn list_tables(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Tables:");
        println!("===============");
        for table in factory_tables() {
            let desc = table.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", table.name, desc);
        }
        println!();
    }

    if show_user {
        println!("User Tables:");
        println!("============");
        let user_tables = list_user_tables();
        if user_tables.is_empty() {
            println!("  (none)");
            println!();
            println!("  Start from a factory table with: sigsweep tables copy hw10 --name <name>\n");
        } else {
            for path in user_tables {
                let name = table_name_from_path(&path).unwrap_or_else(|| "unknown".into());
                match FilterTable::load(&path) {
                    Ok(table) => {
                        let desc = table.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(_) => {
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_table(name: &str) -> anyhow::Result<()> {
    let table = load_table(name)?;

    println!("Table: {}", table.name);
    println!("{}", "=".repeat(7 + table.name.len()));
    println!();

    if let Some(desc) = &table.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Signals ({}):", table.signals.len());
    for (signal, config) in &table.signals {
        print_entry(signal, config);
    }
    if let Some(default) = &table.default {
        print_entry("(any other signal)", default);
    }

    Ok(())
}

fn print_entry(signal: &str, config: &SignalConfig) {
    println!("  {} ({} operations)", signal, config.operation_count());
    match config.to_plan(signal) {
        Ok(plan) => {
            for op in &plan.operations {
                println!("      {}", op.label());
            }
        }
        Err(e) => println!("      (invalid: {e})"),
    }
}

fn check_table(name: &str) -> anyhow::Result<()> {
    let table = load_table(name)?;
    validate_table(&table)?;
    println!("Table '{}' is valid ({} signals).", table.name, table.len());
    Ok(())
}

fn copy_table(source: &str, new_name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let mut table = load_table(source)?;
    let target_name = new_name.unwrap_or(&table.name).to_string();

    let dir = ensure_user_tables_dir()?;
    let table_path = dir.join(format!("{}.toml", target_name));

    if table_path.exists() && !force {
        anyhow::bail!(
            "Table '{}' already exists in user tables. Use --force to overwrite or choose a different name with --name.",
            target_name
        );
    }

    if target_name != table.name {
        table.description = Some(match &table.description {
            Some(desc) => format!("{} (copy of {})", desc, table.name),
            None => format!("Copy of {}", table.name),
        });
        table.name = target_name.clone();
    }
    table.save(&table_path)?;

    println!("Copied table '{}' to user table '{}'", source, target_name);
    println!("Path: {}", table_path.display());

    Ok(())
}

fn delete_table(name: &str, force: bool) -> anyhow::Result<()> {
    if is_factory_table(name) {
        anyhow::bail!("Cannot delete factory table '{}'. Factory tables are built-in.", name);
    }

    let table_path = user_tables_dir().join(format!("{}.toml", name));

    if !table_path.exists() {
        anyhow::bail!("User table '{}' not found.", name);
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of table '{}'.", name);
    }

    std::fs::remove_file(&table_path)?;
    println!("Deleted table '{}'.", name);

    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Table Directories:");
    println!("==================");
    println!();
    println!("User tables: {}", user_tables_dir().display());
    println!("Config dir:  {}", user_config_dir().display());

    Ok(())
}
