// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spreadsheet readers.
//!
//! Turns CSV and Excel bytes into a header row plus string cells.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::ImportError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Excel,
}

impl SheetFormat {
    /// Detects the format from a file name's extension.
    pub fn from_filename(filename: &str) -> Result<Self, ImportError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => Ok(SheetFormat::Csv),
            "xls" | "xlsx" => Ok(SheetFormat::Excel),
            _ => Err(ImportError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// A parsed sheet: header row and data rows of equal or shorter length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses `bytes` as the given format.
pub fn read_table(format: SheetFormat, bytes: &[u8]) -> Result<Table, ImportError> {
    match format {
        SheetFormat::Csv => read_csv(bytes),
        SheetFormat::Excel => read_excel(bytes),
    }
}

fn read_csv(bytes: &[u8]) -> Result<Table, ImportError> {
    // Excel-exported CSVs often start with a UTF-8 BOM
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ImportError::Parse(format!("CSV header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Parse(format!("CSV: {}", e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

fn read_excel(bytes: &[u8]) -> Result<Table, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Parse(format!("Excel: {}", e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ImportError::Parse(format!("Excel sheet: {}", e)))?,
        None => return Ok(Table::default()),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Ok(Table::default()),
    };
    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        // Whole floats print without a fractional part ("5551234", not "5551234.0")
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
