use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use csv::StringRecord;
use tracing::debug;

use crate::domain::{
    COLUMN_AMOUNT, COLUMN_CATEGORY, COLUMN_DATE, COLUMN_DESCRIPTION, COLUMN_TYPE, CellValue,
    RawRecord,
};

use super::TransactionStore;

/// Transaction sheet exported as CSV, with a header row naming the columns.
/// Column order is free; `Description` may be missing.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionStore for CsvStore {
    fn get_all_records(&self) -> Result<Vec<RawRecord>> {
        debug!(path = %self.path.display(), "reading CSV transaction sheet");
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        read_csv_records(file).with_context(|| format!("Failed to read {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Column positions resolved from the header row.
struct ColumnMap {
    date: usize,
    kind: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| anyhow!("Missing required column '{}' in header", name))
        };

        Ok(Self {
            date: require(COLUMN_DATE)?,
            kind: require(COLUMN_TYPE)?,
            category: require(COLUMN_CATEGORY)?,
            amount: require(COLUMN_AMOUNT)?,
            description: find(COLUMN_DESCRIPTION),
        })
    }

    fn cell(record: &StringRecord, index: usize) -> CellValue {
        CellValue::text(record.get(index).unwrap_or(""))
    }

    fn to_raw(&self, record: &StringRecord) -> RawRecord {
        RawRecord {
            date: Self::cell(record, self.date),
            kind: Self::cell(record, self.kind),
            category: Self::cell(record, self.category),
            amount: Self::cell(record, self.amount),
            description: self
                .description
                .map(|i| Self::cell(record, i))
                .unwrap_or_default(),
        }
    }
}

/// Parse CSV rows from any reader. Blank lines are skipped.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers().context("Failed to read CSV header")?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing
        let record = result.with_context(|| format!("CSV parse error on line {}", line))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push(columns.to_raw(&record));
    }

    debug!(rows = records.len(), "parsed CSV rows");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_records() {
        let data = "Date,Type,Category,Amount(UGX),Description\n\
                    2024-01-01,In,Salary,1000000,January pay\n\
                    2024-01-02,Out,Food,\"25,000\",Market\n";
        let records = read_csv_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, CellValue::text("In"));
        assert_eq!(records[1].amount, CellValue::text("25,000"));
        assert_eq!(records[1].description, CellValue::text("Market"));
    }

    #[test]
    fn test_read_csv_shuffled_columns_without_description() {
        let data = "Amount(UGX),Category,Type,Date\n5000,Transport,Out,2024-01-03\n";
        let records = read_csv_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, CellValue::text("2024-01-03"));
        assert_eq!(records[0].category, CellValue::text("Transport"));
        assert_eq!(records[0].description, CellValue::default());
    }

    #[test]
    fn test_read_csv_skips_blank_rows() {
        let data = "Date,Type,Category,Amount(UGX)\n2024-01-01,In,Salary,1\n,,,\n";
        let records = read_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_read_csv_missing_column() {
        let data = "Date,Type,Amount(UGX)\n2024-01-01,In,1\n";
        let err = read_csv_records(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Category"));
    }
}
