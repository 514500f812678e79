use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Transaction, TransactionType, cents_from_number, parse_cents};

pub const COLUMN_DATE: &str = "Date";
pub const COLUMN_TYPE: &str = "Type";
pub const COLUMN_CATEGORY: &str = "Category";
pub const COLUMN_AMOUNT: &str = "Amount(UGX)";
pub const COLUMN_DESCRIPTION: &str = "Description";

/// Date layouts accepted in the `Date` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A spreadsheet cell as the store hands it over: either a number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One untyped row of the transaction sheet, keyed by the sheet's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: CellValue,
    #[serde(rename = "Type")]
    pub kind: CellValue,
    #[serde(rename = "Category")]
    pub category: CellValue,
    #[serde(rename = "Amount(UGX)")]
    pub amount: CellValue,
    #[serde(rename = "Description", default)]
    pub description: CellValue,
}

impl RawRecord {
    pub fn new(
        date: impl Into<CellValue>,
        kind: impl Into<CellValue>,
        category: impl Into<CellValue>,
        amount: impl Into<CellValue>,
    ) -> Self {
        Self {
            date: date.into(),
            kind: kind.into(),
            category: category.into(),
            amount: amount.into(),
            description: CellValue::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<CellValue>) -> Self {
        self.description = description.into();
        self
    }
}

/// A row that could not be turned into a [`Transaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    /// Spreadsheet row number (the header is row 1)
    pub row: usize,
    /// Column header of the offending cell
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl RecordError {
    fn new(row: usize, field: &'static str, value: &CellValue, reason: impl Into<String>) -> Self {
        Self {
            row,
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: invalid {} '{}': {}",
            self.row, self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for RecordError {}

impl Transaction {
    /// Validate a raw sheet row. `row` is only used for error reporting.
    pub fn try_from_record(row: usize, record: RawRecord) -> Result<Self, RecordError> {
        let date = parse_date_cell(&record.date)
            .ok_or_else(|| RecordError::new(row, COLUMN_DATE, &record.date, "unrecognized date"))?;

        let kind = match &record.kind {
            CellValue::Text(s) => TransactionType::from_str(s),
            CellValue::Number(_) => None,
        }
        .ok_or_else(|| {
            RecordError::new(row, COLUMN_TYPE, &record.kind, "expected In or Out")
        })?;

        let category = match &record.category {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
        };
        if category.is_empty() {
            return Err(RecordError::new(
                row,
                COLUMN_CATEGORY,
                &record.category,
                "category is empty",
            ));
        }

        let amount_cents = match &record.amount {
            CellValue::Number(n) => cents_from_number(*n),
            CellValue::Text(s) => parse_cents(s),
        }
        .map_err(|e| RecordError::new(row, COLUMN_AMOUNT, &record.amount, e.to_string()))?;

        Ok(Transaction::new(date, kind, category, amount_cents)
            .with_description(record.description.to_string()))
    }
}

fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    let CellValue::Text(s) = cell else {
        return None;
    };
    let s = s.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Validate every row; the first bad row fails the whole batch.
/// Row numbers start at 2 since the sheet's header occupies row 1.
pub fn validate_records(records: Vec<RawRecord>) -> Result<Vec<Transaction>, RecordError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| Transaction::try_from_record(i + 2, record))
        .collect()
}
