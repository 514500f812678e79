use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{AmountOverflow, ForecastError, RecordError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to fetch transactions: {0:#}")]
    Fetch(#[from] anyhow::Error),

    #[error("Invalid transaction data: {0}")]
    InvalidData(#[from] RecordError),

    /// Every row is valid on its own, but the amounts do not add up within range.
    #[error("Invalid transaction data: {0}")]
    AmountOverflow(#[from] AmountOverflow),

    #[error("Insufficient data: {0}")]
    InsufficientData(ForecastError),

    #[error("Invalid forecast horizon: {0}")]
    Horizon(ForecastError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InsufficientData { .. } => AppError::InsufficientData(err),
            ForecastError::Overflow(overflow) => AppError::AmountOverflow(overflow),
            ForecastError::HorizonOutOfRange { .. } => AppError::Horizon(err),
        }
    }
}
