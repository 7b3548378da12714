//! CLI Commands

pub mod contacts;
pub mod db;
pub mod duplicates;
pub mod files;
pub mod import;
pub mod similar;
