// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::fs;

use anyhow::Result;
use chrono::NaiveDate;
use sente::application::DashboardService;
use sente::domain::RawRecord;
use sente::storage::{CsvStore, JsonStore, MemoryStore};
use tempfile::TempDir;

pub const CSV_HEADER: &str = "Date,Type,Category,Amount(UGX),Description";

/// Helper to create a service over a temporary CSV sheet
pub fn csv_service(rows: &[&str]) -> Result<(DashboardService<CsvStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("transactions.csv");
    let mut contents = String::from(CSV_HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(&path, contents)?;
    Ok((DashboardService::new(CsvStore::new(path)), temp_dir))
}

/// Helper to create a service over a temporary JSON sheet
pub fn json_service(json: &str) -> Result<(DashboardService<JsonStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("transactions.json");
    fs::write(&path, json)?;
    Ok((DashboardService::new(JsonStore::new(path)), temp_dir))
}

pub fn memory_service(records: Vec<RawRecord>) -> DashboardService<MemoryStore> {
    DashboardService::new(MemoryStore::new(records))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a month of typical activity
pub struct StandardSheet;

impl StandardSheet {
    /// Salary in, food/rent/transport out, plus one side income
    pub fn rows() -> Vec<&'static str> {
        vec![
            "2024-01-01,In,Salary,1000000,January pay",
            "2024-01-03,Out,Food,45000,Market",
            "2024-01-05,Out,Rent,300000,",
            "2024-01-05,Out,Transport,20000,Boda boda",
            "2024-01-12,Out,Food,30000,Supermarket",
            "2024-01-15,In,Freelance,250000,Website",
            "2024-01-20,Out,Transport,15000,Taxi",
        ]
    }
}
