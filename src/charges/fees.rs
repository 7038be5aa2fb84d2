use crate::config::LateFeeConfig;
use crate::decimal::{scale, Money};
use crate::errors::{ensure_non_negative, Result};

use super::ChargeCalculator;

/// One-time late fee, a flat fraction of principal. Zero for a non-positive rate.
pub fn calculate_late_fee(principal: Money, config: &LateFeeConfig) -> Result<Money> {
    ensure_non_negative(principal)?;

    if !config.rate.is_positive() {
        return Ok(Money::ZERO);
    }

    scale(principal, config.rate)
}

impl ChargeCalculator for LateFeeConfig {
    fn calculate(&self, principal: Money, _days: u32) -> Result<Money> {
        calculate_late_fee(principal, self)
    }
}
