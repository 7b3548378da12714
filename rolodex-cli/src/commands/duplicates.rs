//! Duplicates Command
//!
//! Find duplicate groups and merge them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use tracing::debug;

use crate::config::CliConfig;
use crate::display;

/// Finds duplicate groups in one file, or in the whole corpus when
/// `file_id` is `None`.
pub fn find(config: &CliConfig, file_id: Option<&str>, output: Option<&Path>) -> Result<()> {
    let rolodex = config.open()?;
    let groups = match file_id {
        Some(id) => rolodex.find_duplicates(id)?,
        None => rolodex.find_corpus_duplicates()?,
    };

    if groups.is_empty() {
        display::success("No duplicates found");
        return Ok(());
    }

    println!();
    println!("Duplicate groups ({}):", groups.len());
    println!();

    display::display_groups(&groups);

    println!();

    if let Some(path) = output {
        let ids: Vec<Vec<String>> = groups.iter().map(|g| g.ids()).collect();
        fs::write(path, serde_json::to_string_pretty(&ids)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        display::info(&format!("Groups written to {}. Review, then run:", path.display()));
        println!("  rolodex duplicates merge {}", path.display());
    }

    Ok(())
}

/// Merges the groups listed in a JSON file.
pub fn merge(config: &CliConfig, input: &Path, yes: bool) -> Result<()> {
    let data =
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let groups: Vec<Vec<String>> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON array of id arrays", input.display()))?;

    debug!(input = %input.display(), groups = groups.len(), "loaded merge groups");

    if groups.is_empty() {
        display::info("Nothing to merge");
        return Ok(());
    }

    if !yes {
        let records: usize = groups.iter().filter(|g| g.len() >= 2).map(|g| g.len() - 1).sum();
        let confirm = Confirm::new()
            .with_prompt(format!(
                "Merge {} group(s) and permanently delete up to {} record(s)?",
                groups.len(),
                records
            ))
            .default(false)
            .interact()?;

        if !confirm {
            display::info("Merge cancelled.");
            return Ok(());
        }
    }

    let rolodex = config.open()?;
    let report = rolodex.merge_duplicates(&groups)?;

    display::display_merge_report(&report);

    Ok(())
}
