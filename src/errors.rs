use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum ChargeError {
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        operation: &'static str,
    },

    #[error("negative amount: {amount}")]
    NegativeAmount {
        amount: Money,
    },

    #[error("invalid installment count: {count}")]
    InvalidInstallmentCount {
        count: u32,
    },

    #[error("invalid rate for {field}: {rate}")]
    InvalidRate {
        field: &'static str,
        rate: Rate,
    },

    #[error("amount due {total} is less than the sum of its components {components}")]
    InconsistentAmountDue {
        total: Money,
        components: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("malformed configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChargeError {
    pub(crate) fn overflow(operation: &'static str) -> Self {
        ChargeError::ArithmeticOverflow { operation }
    }
}

pub type Result<T> = std::result::Result<T, ChargeError>;

/// reject negative monetary inputs at the api boundary
pub(crate) fn ensure_non_negative(amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(ChargeError::NegativeAmount { amount });
    }
    Ok(())
}
