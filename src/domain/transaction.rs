use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, gifts, sales)
    Income,
    /// Money going out (food, rent, transport)
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Parse the spreadsheet `Type` column. The sheet uses `In`/`Out`;
    /// the long forms are accepted as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" | "income" => Some(TransactionType::Income),
            "out" | "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// +1 for income, -1 for expense.
    pub fn sign(&self) -> Cents {
        match self {
            TransactionType::Income => 1,
            TransactionType::Expense => -1,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::from_str(s).ok_or_else(|| format!("Unknown transaction type: {}", s))
    }
}

/// A single validated row of the transaction sheet.
/// Transactions are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date the money moved
    pub date: NaiveDate,
    /// Income or expense; determines the sign of `amount`
    pub kind: TransactionType,
    /// Free-form grouping label (e.g., "Food", "Salary")
    pub category: String,
    /// Magnitude in cents (never negative)
    pub amount_cents: Cents,
    /// Not used in aggregation
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        category: impl Into<String>,
        amount_cents: Cents,
    ) -> Self {
        assert!(amount_cents >= 0, "Transaction amount must not be negative");
        Self {
            date,
            kind,
            category: category.into(),
            amount_cents,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Cents {
        self.kind.sign() * self.amount_cents
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
