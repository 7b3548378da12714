//! Similar Command
//!
//! Compare one file's contacts against every other file.

use anyhow::Result;

use crate::config::CliConfig;
use crate::display;

/// Shows records in other files that share an email or phone.
pub fn run(config: &CliConfig, file_id: &str) -> Result<()> {
    let rolodex = config.open()?;
    let similar = rolodex.find_similar_records(file_id)?;

    if similar.matches.is_empty() {
        display::success(&format!(
            "None of the {} contacts appear in other files",
            similar.own_records.len()
        ));
        return Ok(());
    }

    println!();
    println!(
        "Matches in other files ({} across {} file(s)):",
        similar.matches.len(),
        similar.file_names.len()
    );
    println!();

    display::display_similar(&similar);

    println!();

    Ok(())
}
