use anyhow::Result;

use crate::domain::RawRecord;

use super::TransactionStore;

/// Rows held in memory. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RawRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl TransactionStore for MemoryStore {
    fn get_all_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.records.len())
    }
}
