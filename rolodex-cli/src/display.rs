//! Display Helpers
//!
//! Terminal output formatting and styling.

use chrono::DateTime;
use console::style;
use rolodex_core::{
    ContactRecord, DatabaseInfo, DuplicateGroup, MergeReport, ProcessedFile, SimilarRecords,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Formats a byte count for humans.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Formats Unix seconds as a UTC date and time.
pub fn format_timestamp(secs: u64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Shortens a value to `max` characters for table cells.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        truncate(value, 32)
    }
}

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "File")]
    filename: String,
    #[tabled(rename = "Rows")]
    rows: u64,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Imported")]
    imported: String,
}

/// Displays processed files as a table.
pub fn display_files_table(files: &[ProcessedFile]) {
    let rows: Vec<FileRow> = files
        .iter()
        .map(|f| FileRow {
            id: f.id.clone(),
            filename: f.filename.clone(),
            rows: f.row_count,
            size: format_file_size(f.file_size),
            imported: format_timestamp(f.processed_at),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Reviews")]
    reviews: u32,
    #[tabled(rename = "Merged")]
    merged: &'static str,
}

impl From<&ContactRecord> for ContactRow {
    fn from(c: &ContactRecord) -> Self {
        ContactRow {
            name: or_dash(&c.name),
            email: or_dash(&c.email),
            phone: or_dash(&c.phone),
            city: or_dash(&c.city),
            reviews: c.review_count,
            merged: if c.merged { "yes" } else { "" },
        }
    }
}

/// Displays contacts as a table.
pub fn display_contacts_table(contacts: &[ContactRecord]) {
    let rows: Vec<ContactRow> = contacts.iter().map(ContactRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Displays duplicate groups, one block per group.
pub fn display_groups(groups: &[DuplicateGroup]) {
    for (i, group) in groups.iter().enumerate() {
        println!(
            "  {}. {} {}  ({} records)",
            i + 1,
            style(group.match_type).cyan(),
            style(&group.key).bold(),
            group.len()
        );
        for (j, record) in group.records.iter().enumerate() {
            let marker = if j == 0 {
                style("primary").green().to_string()
            } else {
                style("member").dim().to_string()
            };
            println!(
                "       {:8} {}  {}  {}",
                marker,
                style(&record.id).dim(),
                or_dash(&record.name),
                or_dash(&record.email)
            );
        }
    }
}

/// Displays a merge summary.
pub fn display_merge_report(report: &MergeReport) {
    success(&format!(
        "Merged {} group(s), removed {} record(s)",
        report.groups_merged, report.records_deleted
    ));
    if report.groups_skipped > 0 {
        warning(&format!("Skipped {} group(s)", report.groups_skipped));
    }
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Match")]
    match_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "File")]
    file: String,
}

/// Displays cross-file matches with their source file names.
pub fn display_similar(similar: &SimilarRecords) {
    let rows: Vec<MatchRow> = similar
        .matches
        .iter()
        .map(|m| {
            let file = m
                .file_id()
                .map(|id| similar.file_names.get(id).cloned().unwrap_or_else(|| id.to_string()))
                .unwrap_or_else(|| "-".to_string());
            MatchRow {
                match_type: m.match_type.to_string(),
                name: or_dash(&m.record.name),
                email: or_dash(&m.record.email),
                phone: or_dash(&m.record.phone),
                file,
            }
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

#[derive(Tabled)]
struct DatabaseRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

/// Displays the database catalog.
pub fn display_databases_table(databases: &[DatabaseInfo]) {
    let rows: Vec<DatabaseRow> = databases
        .iter()
        .map(|d| DatabaseRow {
            active: if d.is_active { "*" } else { "" },
            name: d.name.clone(),
            size: format_file_size(d.size),
            modified: format_timestamp(d.modified),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}
