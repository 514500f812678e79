use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::{Ledger, Transaction, TransactionType, fit_series, project};
use crate::storage::TransactionStore;

use super::{AppError, BalanceSummary, CategoryReport, CategorySummary, ForecastReport};

/// Application service providing the dashboard's read-only views.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct DashboardService<S> {
    store: S,
}

/// Filter for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl<S: TransactionStore> DashboardService<S> {
    /// Create a new dashboard service reading from the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch all rows and validate them into a fresh ledger.
    pub fn load_ledger(&self) -> Result<Ledger, AppError> {
        let records = self.store.get_all_records()?;
        debug!(
            source = %self.store.describe(),
            rows = records.len(),
            "fetched transaction rows"
        );
        let ledger = Ledger::from_records(records)?;
        Ok(ledger)
    }

    /// Income, expense and balance over the whole sheet.
    pub fn balance_summary(&self) -> Result<BalanceSummary, AppError> {
        let ledger = self.load_ledger()?;
        let range = ledger.date_range();

        Ok(BalanceSummary {
            total_income: ledger.total(TransactionType::Income)?,
            total_expense: ledger.total(TransactionType::Expense)?,
            balance: ledger.balance()?,
            transaction_count: ledger.len(),
            first_date: range.map(|(first, _)| first),
            last_date: range.map(|(_, last)| last),
        })
    }

    /// Per-category totals for one transaction type.
    pub fn category_report(&self, kind: TransactionType) -> Result<CategoryReport, AppError> {
        let ledger = self.load_ledger()?;
        build_category_report(&ledger, kind)
    }

    /// Fit a line through the cumulative balance and project it `horizon_days` ahead.
    pub fn forecast(&self, horizon_days: u32) -> Result<ForecastReport, AppError> {
        let ledger = self.load_ledger()?;
        let (history, fit) = fit_series(ledger.transactions())?;
        let forecast = project(&history, &fit, horizon_days)?;

        info!(
            slope = fit.slope,
            intercept = fit.intercept,
            points = history.len(),
            "fitted balance trend"
        );

        Ok(ForecastReport {
            horizon_days,
            fit,
            history,
            forecast,
        })
    }

    /// Transactions in chronological order, optionally filtered.
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, AppError> {
        let ledger = self.load_ledger()?;
        let mut transactions: Vec<Transaction> = ledger
            .transactions()
            .iter()
            .filter(|tx| filter.kind.is_none_or(|kind| tx.kind == kind))
            .filter(|tx| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| tx.category.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect();
        transactions.sort_by_key(|tx| tx.date);

        if let Some(limit) = filter.limit {
            let skip = transactions.len().saturating_sub(limit);
            transactions.drain(..skip);
        }
        Ok(transactions)
    }

    /// Validate every row of the store; returns the number of valid rows.
    pub fn validate_store(&self) -> Result<usize, AppError> {
        let ledger = self.load_ledger()?;
        if ledger.is_empty() {
            warn!(source = %self.store.describe(), "transaction sheet has no rows");
        }
        // Per-type totals bound every other sum the views compute
        ledger.total(TransactionType::Income)?;
        ledger.total(TransactionType::Expense)?;
        info!(rows = ledger.len(), "all transaction rows are valid");
        Ok(ledger.len())
    }
}

fn build_category_report(
    ledger: &Ledger,
    kind: TransactionType,
) -> Result<CategoryReport, AppError> {
    let totals = ledger.category_totals(kind)?;
    let total = ledger.total(kind)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tx in ledger.transactions().iter().filter(|tx| tx.kind == kind) {
        *counts.entry(tx.category.as_str()).or_insert(0) += 1;
    }

    let mut categories: Vec<CategorySummary> = totals
        .iter()
        .map(|(category, &cat_total)| CategorySummary {
            category: category.clone(),
            total: cat_total,
            count: counts.get(category.as_str()).copied().unwrap_or(0),
            percentage: if total > 0 {
                cat_total as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    Ok(CategoryReport {
        kind,
        categories,
        total,
    })
}
