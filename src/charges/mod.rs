//! Per-charge formulas. Each is a pure function of principal, elapsed days
//! and its rate configuration, non-negative and non-decreasing in both.

pub mod fees;
pub mod interest;
pub mod iof;

use crate::decimal::Money;
use crate::errors::Result;

pub use fees::calculate_late_fee;
pub use interest::{calculate_late_interest, calculate_rotative_interest};
pub use iof::{calculate_international_iof, calculate_iof};

/// trait for charge calculations, implemented by each charge configuration
pub trait ChargeCalculator {
    /// charge owed on `principal` after `days` elapsed
    fn calculate(&self, principal: Money, days: u32) -> Result<Money>;
}
