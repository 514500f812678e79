use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AmountOverflow, Cents, Transaction};

/// One point of the fitted history: cumulative balance after a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub day_offset: i64,
    pub date: NaiveDate,
    pub cumulative_balance: Cents,
}

/// One projected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub day_offset: i64,
    pub date: NaiveDate,
    /// Predicted balance in (fractional) cents
    pub predicted_balance: f64,
}

/// Ordinary least squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Closed-form two-parameter fit. Needs at least two distinct x values.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, ForecastError> {
        let Some(&(first_x, _)) = points.first() else {
            return Err(ForecastError::InsufficientData { distinct_days: 0 });
        };
        if points.iter().all(|&(x, _)| x == first_x) {
            return Err(ForecastError::InsufficientData { distinct_days: 1 });
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer than two distinct days in the history; the line is underdetermined.
    InsufficientData { distinct_days: usize },
    /// The running balance left the representable range.
    Overflow(AmountOverflow),
    /// The projected dates run past the last representable calendar date.
    HorizonOutOfRange {
        last_date: NaiveDate,
        horizon_days: u32,
    },
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InsufficientData { distinct_days } => write!(
                f,
                "forecast needs transactions on at least 2 distinct days, found {}",
                distinct_days
            ),
            ForecastError::Overflow(err) => write!(f, "cumulative balance: {}", err),
            ForecastError::HorizonOutOfRange {
                last_date,
                horizon_days,
            } => write!(
                f,
                "cannot project {} days past {}: date out of range",
                horizon_days, last_date
            ),
        }
    }
}

impl std::error::Error for ForecastError {}

impl From<AmountOverflow> for ForecastError {
    fn from(err: AmountOverflow) -> Self {
        ForecastError::Overflow(err)
    }
}

/// Cumulative signed balance after each transaction, in chronological order.
/// The sort is stable, so same-day transactions keep their fetch order.
pub fn cumulative_series(
    transactions: &[Transaction],
) -> Result<Vec<SeriesPoint>, AmountOverflow> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.date);

    let Some(start) = sorted.first().map(|tx| tx.date) else {
        return Ok(Vec::new());
    };

    let mut running: Cents = 0;
    sorted
        .into_iter()
        .map(|tx| -> Result<SeriesPoint, AmountOverflow> {
            running = running
                .checked_add(tx.signed_amount())
                .ok_or(AmountOverflow)?;
            Ok(SeriesPoint {
                day_offset: (tx.date - start).num_days(),
                date: tx.date,
                cumulative_balance: running,
            })
        })
        .collect()
}

/// Build the cumulative history and fit a line through it.
pub fn fit_series(
    transactions: &[Transaction],
) -> Result<(Vec<SeriesPoint>, LinearFit), ForecastError> {
    let series = cumulative_series(transactions)?;
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|p| (p.day_offset as f64, p.cumulative_balance as f64))
        .collect();
    let fit = LinearFit::fit(&points)?;
    Ok((series, fit))
}

/// Project the cumulative balance for the `horizon_days` days after the last transaction.
pub fn forecast_balance(
    transactions: &[Transaction],
    horizon_days: u32,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let (series, fit) = fit_series(transactions)?;
    project(&series, &fit, horizon_days)
}

/// Evaluate `fit` at `max_offset+1 ..= max_offset+horizon_days`.
/// Fails before evaluating anything if the last projected date is not a valid date.
pub fn project(
    series: &[SeriesPoint],
    fit: &LinearFit,
    horizon_days: u32,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let Some(last) = series.iter().max_by_key(|p| p.day_offset) else {
        return Ok(Vec::new());
    };
    let out_of_range = || ForecastError::HorizonOutOfRange {
        last_date: last.date,
        horizon_days,
    };
    last.date
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .ok_or_else(out_of_range)?;

    (1..=u64::from(horizon_days))
        .map(|step| -> Result<ForecastPoint, ForecastError> {
            let date = last
                .date
                .checked_add_days(Days::new(step))
                .ok_or_else(out_of_range)?;
            let day_offset = last.day_offset + step as i64;
            Ok(ForecastPoint {
                day_offset,
                date,
                predicted_balance: fit.predict(day_offset as f64),
            })
        })
        .collect()
}
