use crate::config::{InterestConfig, LateInterestConfig};
use crate::decimal::{prorate_monthly, Money};
use crate::errors::{ensure_non_negative, Result};

use super::ChargeCalculator;

/// Revolving interest over `days` at `monthly_rate / 30` per day.
pub fn calculate_rotative_interest(principal: Money, days: u32, config: &InterestConfig) -> Result<Money> {
    ensure_non_negative(principal)?;
    config.validate()?;

    prorate_monthly(principal, config.monthly_rate, days)
}

/// Late payment interest, same daily proration as revolving interest.
///
/// Zero for same-day settlement or a non-positive rate.
pub fn calculate_late_interest(principal: Money, days: u32, config: &LateInterestConfig) -> Result<Money> {
    ensure_non_negative(principal)?;

    if !config.monthly_rate.is_positive() || days == 0 {
        return Ok(Money::ZERO);
    }

    prorate_monthly(principal, config.monthly_rate, days)
}

impl ChargeCalculator for InterestConfig {
    fn calculate(&self, principal: Money, days: u32) -> Result<Money> {
        calculate_rotative_interest(principal, days, self)
    }
}

impl ChargeCalculator for LateInterestConfig {
    fn calculate(&self, principal: Money, days: u32) -> Result<Money> {
        calculate_late_interest(principal, days, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::decimal::Rate;
    use rstest::rstest;

    #[rstest]
    #[case::zero_days(0, 0)]
    #[case::one_day(1, 400)]
    #[case::fifteen_days(15, 6_000)]
    #[case::thirty_days(30, 12_000)]
    fn test_rotative_interest(#[case] days: u32, #[case] expected: i64) {
        let config = EngineConfig::brazilian_credit_card().interest;
        let interest = calculate_rotative_interest(Money::from_minor(100_000), days, &config).unwrap();
        assert_eq!(interest, Money::from_minor(expected));
    }

    #[test]
    fn test_rotative_interest_rounds_half_up() {
        // 1_234 * 0.12 * 7 / 30 = 34.552
        let config = InterestConfig { monthly_rate: Rate::new(120_000) };
        let interest = calculate_rotative_interest(Money::from_minor(1_234), 7, &config).unwrap();
        assert_eq!(interest, Money::from_minor(35));
    }

    #[rstest]
    #[case::same_day(0, 0)]
    #[case::fifteen_days(15, 500)]
    #[case::thirty_days(30, 1_000)]
    fn test_late_interest(#[case] days: u32, #[case] expected: i64) {
        let config = EngineConfig::brazilian_credit_card().late_interest;
        let interest = calculate_late_interest(Money::from_minor(100_000), days, &config).unwrap();
        assert_eq!(interest, Money::from_minor(expected));
    }

    #[test]
    fn test_late_interest_non_positive_rate() {
        let principal = Money::from_minor(100_000);

        let zero = LateInterestConfig { monthly_rate: Rate::ZERO };
        assert_eq!(calculate_late_interest(principal, 30, &zero).unwrap(), Money::ZERO);

        let negative = LateInterestConfig { monthly_rate: Rate::new(-10_000) };
        assert_eq!(calculate_late_interest(principal, 30, &negative).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_trait_dispatch_matches_free_functions() {
        let config = EngineConfig::brazilian_credit_card();
        let principal = Money::from_minor(55_555);

        assert_eq!(
            config.interest.calculate(principal, 12).unwrap(),
            calculate_rotative_interest(principal, 12, &config.interest).unwrap()
        );
        assert_eq!(
            config.late_interest.calculate(principal, 12).unwrap(),
            calculate_late_interest(principal, 12, &config.late_interest).unwrap()
        );
    }
}
