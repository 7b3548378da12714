//! Import Command
//!
//! Imports spreadsheets into the active database.

use std::path::PathBuf;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rolodex_core::{ImportError, RolodexError};
use tracing::debug;

use crate::config::CliConfig;
use crate::display;

/// Imports each file in turn; one failing file does not stop the rest.
pub fn run(config: &CliConfig, files: &[PathBuf]) -> Result<()> {
    let rolodex = config.open()?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut imported = Vec::new();
    let mut failed = Vec::new();

    for path in files {
        pb.set_message(path.display().to_string());
        match rolodex.import_file(path) {
            Ok(result) => imported.push(result),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "import failed");
                failed.push((path.clone(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for result in &imported {
        display::success(&format!(
            "{}: {} contacts (file ID {})",
            result.file.filename, result.file.row_count, result.file.id
        ));
    }

    for (path, e) in &failed {
        let reason = match e {
            RolodexError::Import(ImportError::AlreadyProcessed(existing)) => {
                format!("already imported as '{}'", existing)
            }
            other => other.to_string(),
        };
        display::error(&format!("{}: {}", path.display(), reason));
    }

    if imported.is_empty() && !failed.is_empty() {
        bail!("No files imported");
    }

    if !imported.is_empty() {
        println!();
        display::info("Check for duplicates with:");
        println!("  rolodex duplicates find <FILE_ID>");
    }

    Ok(())
}
