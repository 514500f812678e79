use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::RawRecord;

use super::TransactionStore;

/// Transaction sheet exported as a JSON array of row objects keyed by column header,
/// the shape a spreadsheet API's "all records" call returns.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionStore for JsonStore {
    fn get_all_records(&self) -> Result<Vec<RawRecord>> {
        debug!(path = %self.path.display(), "reading JSON transaction sheet");
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        read_json_records(file).with_context(|| format!("Failed to read {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let records: Vec<RawRecord> =
        serde_json::from_reader(reader).context("Malformed transaction rows")?;
    debug!(rows = records.len(), "parsed JSON rows");
    Ok(records)
}
