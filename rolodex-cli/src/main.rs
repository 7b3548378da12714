// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rolodex CLI
//!
//! Command-line interface for Rolodex - contact list import and
//! duplicate cleanup.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(version, about = "Import contact lists and clean up duplicates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir + /rolodex)
    #[arg(long, global = true, env = "ROLODEX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Database file inside the data directory
    #[arg(long, global = true, env = "ROLODEX_DB", default_value = "contacts.db")]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one or more spreadsheets (csv, txt, xls, xlsx)
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Manage imported files
    #[command(subcommand)]
    Files(FileCommands),

    /// Browse contacts
    #[command(subcommand)]
    Contacts(ContactCommands),

    /// Find and merge duplicate contacts
    #[command(subcommand)]
    Duplicates(DuplicateCommands),

    /// Show records in other files that match a file's contacts
    Similar {
        /// File ID
        file_id: String,
    },

    /// Manage database files
    #[command(subcommand)]
    Db(DbCommands),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum FileCommands {
    /// List imported files, newest first
    List,

    /// Delete a file and all of its contacts
    Delete {
        /// File ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List contacts by review count
    List {
        /// Only contacts from this file
        #[arg(long)]
        file: Option<String>,
    },
}

#[derive(Subcommand)]
enum DuplicateCommands {
    /// Find duplicate groups in a file, or across all files
    Find {
        /// File ID
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        file_id: Option<String>,

        /// Search the whole corpus
        #[arg(long)]
        all: bool,

        /// Write the groups as JSON, ready for `duplicates merge`
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Merge groups from a JSON file (first id of each group survives)
    Merge {
        /// JSON file holding an array of id arrays
        input: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// List databases in the data directory
    List,

    /// Create an empty database
    Create {
        /// Database name
        name: String,
    },

    /// Delete a database
    Delete {
        /// Database name
        name: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rolodex=info,rolodex_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Resolve data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rolodex")
    });

    let config = CliConfig {
        data_dir,
        database: cli.db,
    };

    match cli.command {
        Commands::Import { files } => commands::import::run(&config, &files)?,
        Commands::Files(cmd) => match cmd {
            FileCommands::List => commands::files::list(&config)?,
            FileCommands::Delete { id } => commands::files::delete(&config, &id)?,
        },
        Commands::Contacts(cmd) => match cmd {
            ContactCommands::List { file } => commands::contacts::list(&config, file.as_deref())?,
        },
        Commands::Duplicates(cmd) => match cmd {
            DuplicateCommands::Find {
                file_id,
                all,
                output,
            } => {
                let scope = if all { None } else { file_id.as_deref() };
                commands::duplicates::find(&config, scope, output.as_deref())?;
            }
            DuplicateCommands::Merge { input, yes } => {
                commands::duplicates::merge(&config, &input, yes)?;
            }
        },
        Commands::Similar { file_id } => commands::similar::run(&config, &file_id)?,
        Commands::Db(cmd) => match cmd {
            DbCommands::List => commands::db::list(&config)?,
            DbCommands::Create { name } => commands::db::create(&config, &name)?,
            DbCommands::Delete { name } => commands::db::delete(&config, &name)?,
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "rolodex", &mut io::stdout());
        }
    }

    Ok(())
}
