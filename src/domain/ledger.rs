use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{
    AmountOverflow, Cents, RawRecord, RecordError, Transaction, TransactionType, checked_sum,
    validate_records,
};

/// Balance = sum of income amounts - sum of expense amounts.
pub fn compute_balance(transactions: &[Transaction]) -> Result<Cents, AmountOverflow> {
    checked_sum(transactions.iter().map(|tx| tx.signed_amount()))
}

/// Sum of amounts for one transaction type.
pub fn compute_total(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Result<Cents, AmountOverflow> {
    checked_sum(
        transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount_cents),
    )
}

/// Totals per category, restricted to one transaction type.
/// Categories without a matching transaction are absent from the map.
pub fn compute_category_totals(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Result<BTreeMap<String, Cents>, AmountOverflow> {
    let mut totals: BTreeMap<String, Cents> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| tx.kind == kind) {
        let total = totals.entry(tx.category.clone()).or_insert(0);
        *total = total.checked_add(tx.amount_cents).ok_or(AmountOverflow)?;
    }

    Ok(totals)
}

/// Request-scoped view over the fetched transactions, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Validate raw sheet rows and build a ledger. Any bad row fails the whole ledger.
    pub fn from_records(records: Vec<RawRecord>) -> Result<Self, RecordError> {
        Ok(Self::new(validate_records(records)?))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn balance(&self) -> Result<Cents, AmountOverflow> {
        compute_balance(&self.transactions)
    }

    pub fn total(&self, kind: TransactionType) -> Result<Cents, AmountOverflow> {
        compute_total(&self.transactions, kind)
    }

    pub fn category_totals(
        &self,
        kind: TransactionType,
    ) -> Result<BTreeMap<String, Cents>, AmountOverflow> {
        compute_category_totals(&self.transactions, kind)
    }

    /// Earliest and latest transaction dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.transactions.iter().map(|tx| tx.date).min()?;
        let last = self.transactions.iter().map(|tx| tx.date).max()?;
        Some((first, last))
    }
}
