use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::errors::{ChargeError, Result};

/// implicit denominator of every [`Rate`]: six decimal digits
pub const RATE_DENOMINATOR: i64 = 1_000_000;

/// commercial month used to derive daily rates from monthly ones
pub const DAYS_PER_MONTH: i64 = 30;

/// Money as a signed count of centavos.
///
/// All engine arithmetic stays in this integer domain; [`Decimal`] is only
/// used at the boundary for display and interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// create from minor units (centavos)
    pub const fn from_minor(centavos: i64) -> Self {
        Money(centavos)
    }

    /// create from major units (reais)
    pub fn from_major(units: i64) -> Result<Self> {
        units
            .checked_mul(100)
            .map(Money)
            .ok_or_else(|| ChargeError::overflow("money from major"))
    }

    /// create from decimal, rounding half-up to the centavo
    pub fn from_decimal(d: Decimal) -> Result<Self> {
        (d * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Money)
            .ok_or_else(|| ChargeError::overflow("money from decimal"))
    }

    /// centavo count
    pub const fn as_minor(&self) -> i64 {
        self.0
    }

    /// value in major units with two decimal places
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// addition reporting overflow instead of wrapping
    pub fn checked_add(self, other: Money) -> Result<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| ChargeError::overflow("money add"))
    }

    pub fn checked_sub(self, other: Money) -> Result<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| ChargeError::overflow("money sub"))
    }

    /// sum of `amounts`, failing on the first overflow
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Result<Money> {
        amounts.into_iter().try_fold(Money::ZERO, Money::checked_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_decimal().to_string())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Rate as a numerator over [`RATE_DENOMINATOR`].
///
/// `Rate::new(82)` is 0.000082, `Rate::new(120_000)` is 12%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rate(i64);

impl Rate {
    pub const ZERO: Rate = Rate(0);
    pub const ONE: Rate = Rate(RATE_DENOMINATOR);

    pub const fn new(numerator: i64) -> Self {
        Rate(numerator)
    }

    pub const fn numerator(&self) -> i64 {
        self.0
    }

    /// create from decimal fraction (e.g., 0.12 for 12%), rounded to six places
    pub fn from_decimal(d: Decimal) -> Result<Self> {
        (d * Decimal::from(RATE_DENOMINATOR))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Rate)
            .ok_or_else(|| ChargeError::overflow("rate from decimal"))
    }

    /// create from basis points (e.g., 199 for 1.99%)
    pub const fn from_bps(bps: i64) -> Self {
        Rate(bps * 100)
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 6)
    }

    pub fn as_percentage(&self) -> Decimal {
        (self.as_decimal() * Decimal::ONE_HUNDRED).normalize()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

/// multiply all factors in i128 and divide once, rounding half-up
fn mul_div_round(factors: &[i64], denominator: i128, operation: &'static str) -> Result<Money> {
    let numerator = factors
        .iter()
        .try_fold(1_i128, |acc, &f| acc.checked_mul(i128::from(f)))
        .and_then(|n| n.checked_add(denominator / 2))
        .ok_or_else(|| ChargeError::overflow(operation))?;

    i64::try_from(numerator / denominator)
        .map(Money)
        .map_err(|_| ChargeError::overflow(operation))
}

/// `round_half_up(principal * rate)`
pub fn scale(principal: Money, rate: Rate) -> Result<Money> {
    mul_div_round(&[principal.0, rate.0], i128::from(RATE_DENOMINATOR), "scale")
}

/// `round_half_up(principal * rate * days)`.
///
/// The triple product is accumulated before the single division; per-day
/// amounts are never rounded.
pub fn scale_over_days(principal: Money, rate: Rate, days: u32) -> Result<Money> {
    mul_div_round(
        &[principal.0, rate.0, i64::from(days)],
        i128::from(RATE_DENOMINATOR),
        "scale over days",
    )
}

/// `round_half_up(principal * monthly_rate * days / 30)`
pub fn prorate_monthly(principal: Money, monthly_rate: Rate, days: u32) -> Result<Money> {
    mul_div_round(
        &[principal.0, monthly_rate.0, i64::from(days)],
        i128::from(DAYS_PER_MONTH) * i128::from(RATE_DENOMINATOR),
        "monthly proration",
    )
}

/// Fixed-point `(1 + rate)^periods`, rounding half-up after every step.
///
/// The growth factor shares the [`Rate`] denominator, so `fixed_pow(r, 0)`
/// is [`Rate::ONE`].
pub fn fixed_pow(rate: Rate, periods: u32) -> Result<Rate> {
    let denominator = i128::from(RATE_DENOMINATOR);
    let base = denominator + i128::from(rate.0);
    let mut result = denominator;

    for _ in 0..periods {
        result = result
            .checked_mul(base)
            .and_then(|n| n.checked_add(denominator / 2))
            .ok_or_else(|| ChargeError::overflow("fixed pow"))?
            / denominator;
    }

    i64::try_from(result)
        .map(Rate)
        .map_err(|_| ChargeError::overflow("fixed pow"))
}
