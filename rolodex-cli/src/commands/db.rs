//! Database Command
//!
//! List, create and delete database files in the data directory.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Lists databases; the active one is marked.
pub fn list(config: &CliConfig) -> Result<()> {
    let active = config.storage_path();
    let databases = config.catalog().list(Some(active.as_path()))?;

    if databases.is_empty() {
        display::info(&format!("No databases in {}", config.data_dir.display()));
        return Ok(());
    }

    println!();
    display::display_databases_table(&databases);
    println!();

    Ok(())
}

/// Creates a new, empty database.
pub fn create(config: &CliConfig, name: &str) -> Result<()> {
    let path = config.catalog().create(name)?;

    display::success(&format!("Created {}", path.display()));
    display::info("Use it with:");
    println!("  rolodex --db {} <COMMAND>", name);

    Ok(())
}

/// Deletes a database other than the active one.
pub fn delete(config: &CliConfig, name: &str) -> Result<()> {
    let active = config.storage_path();
    config.catalog().delete(name, Some(active.as_path()))?;

    display::success(&format!("Deleted database {}", name));

    Ok(())
}
