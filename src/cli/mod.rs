use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::application::{AppError, DashboardService, TransactionFilter};
use crate::config::{Config, ConfigManager, MAX_FORECAST_HORIZON_DAYS};
use crate::domain::{Cents, TransactionType, compute_balance, format_cents, round_cents};
use crate::logging;
use crate::storage::{TransactionStore, open_store};

/// Sente - Personal Finance Dashboard
#[derive(Parser)]
#[command(name = "sente")]
#[command(about = "Balance, category spending and savings forecast from a transaction sheet")]
#[command(version)]
pub struct Cli {
    /// Transaction sheet export (.csv or .json); overrides the config file
    #[arg(short, long, global = true, env = "SENTE_STORE")]
    pub store: Option<PathBuf>,

    /// Configuration file (defaults to <config_dir>/sente/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Currency label shown next to amounts; overrides the config file
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show total income, total expenses and the current balance
    Dashboard {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show totals per category
    Categories {
        /// Transaction type: expense (out) or income (in)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Project the balance forward with a linear trend
    Forecast {
        /// Number of days to project (defaults to the configured horizon)
        #[arg(
            short,
            long,
            value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_FORECAST_HORIZON_DAYS))
        )]
        days: Option<u32>,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List transactions in chronological order
    Transactions {
        /// Filter by type: expense (out) or income (in)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Filter by category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Show only the most recent N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Validate every row of the transaction sheet
    Check,
}

impl Cli {
    /// Merge command-line overrides over the configuration file.
    fn resolve_config(&self) -> Result<Config, AppError> {
        let manager = match &self.config {
            Some(path) => Some(ConfigManager::new(path.clone())),
            None => ConfigManager::default_location(),
        };
        let mut config = match manager {
            Some(manager) => {
                debug!(path = %manager.config_path().display(), "loading configuration");
                manager.load()?
            }
            None => Config::default(),
        };

        if let Some(store) = &self.store {
            config.store = Some(store.clone());
        }
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let config = self.resolve_config()?;
        let store_path = config.store.clone().ok_or_else(|| {
            anyhow!("No transaction store configured. Pass --store <file> or set SENTE_STORE")
        })?;
        let store = open_store(&store_path)?;
        let service = DashboardService::new(store);

        match self.command {
            Commands::Dashboard { format } => run_dashboard_command(&service, &config, &format)?,

            Commands::Categories { kind, format } => {
                let kind = parse_kind(&kind)?;
                run_categories_command(&service, &config, kind, &format)?;
            }

            Commands::Forecast { days, format } => {
                let horizon = days.unwrap_or(config.forecast_horizon_days);
                run_forecast_command(&service, &config, horizon, &format)?;
            }

            Commands::Transactions {
                kind,
                category,
                limit,
            } => {
                let filter = TransactionFilter {
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    category,
                    limit,
                };
                run_transactions_command(&service, &config, &filter)?;
            }

            Commands::Check => {
                let rows = service.validate_store()?;
                println!(
                    "Transaction sheet OK: {} valid rows in {}",
                    rows,
                    service.store().describe()
                );
            }
        }

        Ok(())
    }
}

fn run_dashboard_command<S: TransactionStore>(
    service: &DashboardService<S>,
    config: &Config,
    format: &str,
) -> Result<()> {
    let summary = service.balance_summary()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "csv" => {
            println!("type,amount");
            println!("income,{}", summary.total_income);
            println!("expense,{}", summary.total_expense);
            println!("balance,{}", summary.balance);
        }
        _ => {
            println!("Savings Dashboard");
            if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
                println!(
                    "Period: {} to {} ({} transactions)",
                    first.format("%Y-%m-%d"),
                    last.format("%Y-%m-%d"),
                    summary.transaction_count
                );
            } else {
                println!("No transactions recorded yet.");
            }
            println!();
            println!(
                "Total Income:   {:>20}",
                format_amount(summary.total_income, &config.currency)
            );
            println!(
                "Total Expenses: {:>20}",
                format_amount(summary.total_expense, &config.currency)
            );
            println!("{}", "-".repeat(37));
            println!(
                "Balance:        {:>20}",
                format_amount(summary.balance, &config.currency)
            );
        }
    }

    Ok(())
}

fn run_categories_command<S: TransactionStore>(
    service: &DashboardService<S>,
    config: &Config,
    kind: TransactionType,
    format: &str,
) -> Result<()> {
    let report = service.category_report(kind)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "csv" => {
            println!("category,total,count,percentage");
            for cat in &report.categories {
                println!(
                    "{},{},{},{:.2}",
                    cat.category, cat.total, cat.count, cat.percentage
                );
            }
        }
        _ => {
            let title = match kind {
                TransactionType::Expense => "Spending by Category",
                TransactionType::Income => "Income by Source",
            };
            println!("{}", title);
            println!();

            if report.categories.is_empty() {
                println!("No {} transactions.", kind);
                return Ok(());
            }

            println!(
                "{:<20} {:>18} {:>8} {:>8}",
                "CATEGORY", "TOTAL", "COUNT", "PERCENT"
            );
            println!("{}", "-".repeat(57));

            for cat in &report.categories {
                println!(
                    "{:<20} {:>18} {:>8} {:>7.1}%",
                    truncate(&cat.category, 20),
                    format_cents(cat.total),
                    cat.count,
                    cat.percentage
                );
            }

            println!("{}", "-".repeat(57));
            println!(
                "{:<20} {:>18}",
                "TOTAL",
                format_amount(report.total, &config.currency)
            );
        }
    }

    Ok(())
}

fn run_forecast_command<S: TransactionStore>(
    service: &DashboardService<S>,
    config: &Config,
    horizon_days: u32,
    format: &str,
) -> Result<()> {
    let report = service.forecast(horizon_days)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "csv" => {
            println!("series,day_offset,date,balance");
            for point in &report.history {
                println!(
                    "actual,{},{},{}",
                    point.day_offset, point.date, point.cumulative_balance
                );
            }
            for point in &report.forecast {
                println!(
                    "projected,{},{},{:.2}",
                    point.day_offset, point.date, point.predicted_balance
                );
            }
        }
        _ => {
            println!("Savings Growth Projection ({} days)", horizon_days);
            println!(
                "Trend: {} per day",
                format_amount(round_cents(report.fit.slope), &config.currency)
            );
            if let Some(last) = report.history.last() {
                println!(
                    "Current balance ({}): {}",
                    last.date.format("%Y-%m-%d"),
                    format_amount(last.cumulative_balance, &config.currency)
                );
            }
            println!();

            if report.forecast.is_empty() {
                println!("Nothing to project for a horizon of 0 days.");
                return Ok(());
            }

            println!("{:<12} {:>6} {:>20}", "DATE", "DAY", "PROJECTED");
            println!("{}", "-".repeat(40));
            for point in &report.forecast {
                println!(
                    "{:<12} {:>6} {:>20}",
                    point.date.format("%Y-%m-%d"),
                    point.day_offset,
                    format_cents(round_cents(point.predicted_balance))
                );
            }
        }
    }

    Ok(())
}

fn run_transactions_command<S: TransactionStore>(
    service: &DashboardService<S>,
    config: &Config,
    filter: &TransactionFilter,
) -> Result<()> {
    let transactions = service.list_transactions(filter)?;

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!(
        "{:<12} {:<8} {:<20} {:>18}  DESCRIPTION",
        "DATE", "TYPE", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(80));

    for tx in &transactions {
        println!(
            "{:<12} {:<8} {:<20} {:>18}  {}",
            tx.date.format("%Y-%m-%d"),
            tx.kind,
            truncate(&tx.category, 20),
            format_cents(tx.signed_amount()),
            truncate(&tx.description, 30)
        );
    }

    let net = compute_balance(&transactions).map_err(AppError::from)?;
    println!("{}", "-".repeat(80));
    println!(
        "{} transactions, net {}",
        transactions.len(),
        format_amount(net, &config.currency)
    );

    Ok(())
}

fn parse_kind(value: &str) -> Result<TransactionType> {
    value
        .parse()
        .map_err(|e: String| anyhow!(e))
        .with_context(|| format!("Invalid type '{}'. Valid: income (in), expense (out)", value))
}

fn format_amount(cents: Cents, currency: &str) -> String {
    format!("{} {}", format_cents(cents), currency)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
