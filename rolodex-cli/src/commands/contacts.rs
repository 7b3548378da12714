//! Contacts Command
//!
//! List contacts.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Lists contacts, optionally limited to one file.
pub fn list(config: &CliConfig, file_id: Option<&str>) -> Result<()> {
    let rolodex = config.open()?;
    let contacts = match file_id {
        Some(id) => rolodex.list_file_contacts(id)?,
        None => rolodex.list_contacts()?,
    };

    if contacts.is_empty() {
        display::info("No contacts yet. Import a spreadsheet with:");
        println!("  rolodex import <FILE>");
        return Ok(());
    }

    println!();
    println!("Contacts ({}):", contacts.len());
    println!();

    display::display_contacts_table(&contacts);

    println!();

    Ok(())
}
