mod common;

use anyhow::Result;
use common::{StandardSheet, csv_service};
use sente::domain::TransactionType;

#[test]
fn test_expense_category_report() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;

    let report = service.category_report(TransactionType::Expense)?;

    assert_eq!(report.kind, TransactionType::Expense);
    assert_eq!(report.total, 41000000);
    assert_eq!(report.categories.len(), 3);

    // Largest first
    let rent = &report.categories[0];
    assert_eq!(rent.category, "Rent");
    assert_eq!(rent.total, 30000000);
    assert_eq!(rent.count, 1);
    assert!((rent.percentage - 73.17).abs() < 0.01);

    let food = &report.categories[1];
    assert_eq!(food.category, "Food");
    assert_eq!(food.total, 7500000);
    assert_eq!(food.count, 2);

    let transport = &report.categories[2];
    assert_eq!(transport.category, "Transport");
    assert_eq!(transport.total, 3500000);

    let sum: i64 = report.categories.iter().map(|c| c.total).sum();
    assert_eq!(sum, report.total);
    let pct: f64 = report.categories.iter().map(|c| c.percentage).sum();
    assert!((pct - 100.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_income_category_report() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;

    let report = service.category_report(TransactionType::Income)?;
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();

    assert_eq!(names, vec!["Salary", "Freelance"]);
    assert_eq!(report.total, 125000000);
    assert!((report.categories[0].percentage - 80.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_category_report_without_matches() -> Result<()> {
    let (service, _temp) = csv_service(&["2024-01-01,In,Salary,1000,"])?;

    let report = service.category_report(TransactionType::Expense)?;
    assert!(report.categories.is_empty());
    assert_eq!(report.total, 0);

    Ok(())
}

#[test]
fn test_reports_serialize_to_json() -> Result<()> {
    let (service, _temp) = csv_service(&StandardSheet::rows())?;

    let summary = serde_json::to_value(service.balance_summary()?)?;
    assert_eq!(summary["balance"], 84000000);
    assert_eq!(summary["first_date"], "2024-01-01");

    let report = serde_json::to_value(service.category_report(TransactionType::Expense)?)?;
    assert_eq!(report["kind"], "expense");
    assert_eq!(report["categories"][0]["category"], "Rent");

    Ok(())
}
