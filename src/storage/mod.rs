mod csv_store;
mod json_store;
mod memory;

pub use csv_store::*;
pub use json_store::*;
pub use memory::*;

use std::path::Path;

use anyhow::{Result, bail};

use crate::domain::RawRecord;

/// Source of raw transaction rows.
/// Implementations return rows in whatever order the backing sheet holds them.
pub trait TransactionStore {
    /// Fetch every row of the transaction sheet.
    fn get_all_records(&self) -> Result<Vec<RawRecord>>;

    /// Short human-readable description of where rows come from.
    fn describe(&self) -> String;
}

impl<S: TransactionStore + ?Sized> TransactionStore for Box<S> {
    fn get_all_records(&self) -> Result<Vec<RawRecord>> {
        (**self).get_all_records()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Open a file-backed store, choosing the backend from the file extension.
pub fn open_store(path: &Path) -> Result<Box<dyn TransactionStore>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvStore::new(path))),
        Some("json") => Ok(Box::new(JsonStore::new(path))),
        _ => bail!(
            "Unsupported transaction store '{}': expected a .csv or .json export",
            path.display()
        ),
    }
}
