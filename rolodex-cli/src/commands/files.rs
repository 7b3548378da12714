//! Files Command
//!
//! List and delete imported files.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Lists imported files.
pub fn list(config: &CliConfig) -> Result<()> {
    let rolodex = config.open()?;
    let files = rolodex.list_files()?;

    if files.is_empty() {
        display::info("No files imported yet. Import one with:");
        println!("  rolodex import <FILE>");
        return Ok(());
    }

    println!();
    println!("Files ({}):", files.len());
    println!();

    display::display_files_table(&files);

    println!();

    Ok(())
}

/// Deletes a file together with its contacts.
pub fn delete(config: &CliConfig, id: &str) -> Result<()> {
    let rolodex = config.open()?;
    let removed = rolodex.delete_file(id)?;

    display::success(&format!("Deleted file {} ({} contacts)", id, removed));

    Ok(())
}
