mod common;

use anyhow::Result;
use common::{StandardSheet, csv_service, memory_service, parse_date};
use sente::application::{AppError, TransactionFilter};
use sente::domain::{
    COLUMN_AMOUNT, Ledger, RawRecord, TransactionType, compute_balance, compute_category_totals,
    cumulative_series,
};

#[test]
fn test_example_scenario() -> Result<()> {
    let service = memory_service(vec![
        RawRecord::new("2024-01-01", "In", "Salary", "1000"),
        RawRecord::new("2024-01-02", "Out", "Food", "200"),
        RawRecord::new("2024-01-03", "Out", "Food", "100"),
    ]);

    let ledger = service.load_ledger()?;
    assert_eq!(ledger.balance()?, 70000);

    let expenses = ledger.category_totals(TransactionType::Expense)?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses.get("Food"), Some(&30000));

    let series: Vec<(i64, i64)> = cumulative_series(ledger.transactions())?
        .iter()
        .map(|p| (p.day_offset, p.cumulative_balance))
        .collect();
    assert_eq!(series, vec![(0, 100000), (1, 80000), (2, 70000)]);

    Ok(())
}

#[test]
fn test_balance_from_csv_sheet() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;

    let summary = service.balance_summary()?;
    assert_eq!(summary.total_income, 125000000);
    assert_eq!(summary.total_expense, 41000000);
    assert_eq!(summary.balance, 84000000);
    assert_eq!(summary.transaction_count, 7);
    assert_eq!(summary.first_date, Some(parse_date("2024-01-01")));
    assert_eq!(summary.last_date, Some(parse_date("2024-01-20")));

    Ok(())
}

#[test]
fn test_empty_sheet() -> Result<()> {
    let (service, _temp) = csv_service(&[])?;

    let summary = service.balance_summary()?;
    assert_eq!(summary.balance, 0);
    assert_eq!(summary.transaction_count, 0);
    assert_eq!(summary.first_date, None);

    Ok(())
}

#[test]
fn test_expense_totals_match_balance() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;
    let ledger = service.load_ledger()?;

    let expenses = compute_category_totals(ledger.transactions(), TransactionType::Expense)?;
    let incomes = compute_category_totals(ledger.transactions(), TransactionType::Income)?;
    let expense_sum: i64 = expenses.values().sum();
    let income_sum: i64 = incomes.values().sum();

    assert_eq!(income_sum - expense_sum, compute_balance(ledger.transactions())?);
    assert!(!expenses.contains_key("Salary"));
    assert!(!incomes.contains_key("Food"));

    Ok(())
}

#[test]
fn test_malformed_amount_fails_whole_request() -> Result<()> {
    let (service, _temp) = csv_service(&[
        "2024-01-01,In,Salary,1000,",
        "2024-01-02,Out,Food,abc,",
        "2024-01-03,Out,Food,100,",
    ])?;

    let err = service.balance_summary().unwrap_err();
    match err {
        AppError::InvalidData(record_err) => {
            assert_eq!(record_err.row, 3);
            assert_eq!(record_err.field, COLUMN_AMOUNT);
            assert_eq!(record_err.value, "abc");
        }
        other => panic!("expected InvalidData, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_unknown_type_is_invalid_data() -> Result<()> {
    let service = memory_service(vec![RawRecord::new("2024-01-01", "Transfer", "Savings", "10")]);

    assert!(matches!(
        service.validate_store(),
        Err(AppError::InvalidData(_))
    ));
    assert!(Ledger::from_records(vec![RawRecord::new("2024-01-01", "Out", "Food", "-10")]).is_err());

    Ok(())
}

#[test]
fn test_list_transactions_filters() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;

    let transport = service.list_transactions(&TransactionFilter {
        kind: None,
        category: Some("transport".into()),
        limit: None,
    })?;
    assert_eq!(transport.len(), 2);
    assert_eq!(transport[0].description, "Boda boda");

    let incomes = service.list_transactions(&TransactionFilter {
        kind: Some(TransactionType::Income),
        ..Default::default()
    })?;
    assert_eq!(incomes.len(), 2);
    assert!(incomes.iter().all(|tx| tx.is_income()));

    Ok(())
}

#[test]
fn test_huge_amounts_overflow_as_invalid_data() -> Result<()> {
    let (service, _temp) = csv_service(&[
        "2024-01-01,In,Bonus,90000000000000000,",
        "2024-01-02,In,Bonus,90000000000000000,",
    ])?;

    let err = service.balance_summary().unwrap_err();
    assert!(matches!(err, AppError::AmountOverflow(_)));
    assert!(err.to_string().starts_with("Invalid transaction data"));
    assert!(service.validate_store().is_err());

    Ok(())
}
