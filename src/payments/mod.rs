pub mod waterfall;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ensure_non_negative, Result};
use crate::types::RotativeResult;

pub use waterfall::{apply_payment, ChargeCategory, PaymentWaterfall, WATERFALL_ORDER};

/// amount owed, broken down by charge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AmountDue {
    pub iof: Money,
    pub interest: Money,
    pub late_interest: Money,
    pub late_fee: Money,
    pub principal: Money,
}

impl AmountDue {
    /// sum of all categories, failing on overflow
    pub fn total(&self) -> Result<Money> {
        Money::checked_sum(WATERFALL_ORDER.iter().map(|&category| self.get(category)))
    }

    /// amount owed in one category
    pub fn get(&self, category: ChargeCategory) -> Money {
        match category {
            ChargeCategory::Iof => self.iof,
            ChargeCategory::Interest => self.interest,
            ChargeCategory::LateInterest => self.late_interest,
            ChargeCategory::LateFee => self.late_fee,
            ChargeCategory::Principal => self.principal,
        }
    }

    pub fn validate(&self) -> Result<()> {
        WATERFALL_ORDER
            .iter()
            .try_for_each(|&category| ensure_non_negative(self.get(category)))
    }
}

impl From<&RotativeResult> for AmountDue {
    fn from(result: &RotativeResult) -> Self {
        Self {
            iof: result.iof,
            interest: result.interest,
            late_interest: result.late_interest,
            late_fee: result.late_fee,
            principal: result.principal,
        }
    }
}
