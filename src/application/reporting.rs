use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Cents, ForecastPoint, LinearFit, SeriesPoint, TransactionType};

/// Dashboard headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub total_income: Cents,
    pub total_expense: Cents,
    pub balance: Cents,
    pub transaction_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub kind: TransactionType,
    /// Sorted by total descending, then by name
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Cents,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub horizon_days: u32,
    pub fit: LinearFit,
    pub history: Vec<SeriesPoint>,
    pub forecast: Vec<ForecastPoint>,
}

impl ForecastReport {
    /// Predicted balance on the last day of the horizon.
    pub fn final_prediction(&self) -> Option<f64> {
        self.forecast.last().map(|p| p.predicted_balance)
    }
}
