use crate::config::{InternationalIofConfig, IofConfig};
use crate::decimal::{scale, scale_over_days, Money};
use crate::errors::{ensure_non_negative, Result};

use super::ChargeCalculator;

/// IOF over `days`: daily component plus flat surcharge, with the sum capped
/// at `max_annual_rate` of the principal.
pub fn calculate_iof(principal: Money, days: u32, config: &IofConfig) -> Result<Money> {
    ensure_non_negative(principal)?;
    config.validate()?;

    let daily = scale_over_days(principal, config.daily_rate, days)?;
    let additional = scale(principal, config.additional_rate)?;
    let cap = scale(principal, config.max_annual_rate)?;

    Ok(daily.checked_add(additional)?.min(cap))
}

/// IOF on a single international purchase
pub fn calculate_international_iof(amount: Money, config: &InternationalIofConfig) -> Result<Money> {
    ensure_non_negative(amount)?;
    config.validate()?;

    scale(amount, config.rate)
}

impl ChargeCalculator for IofConfig {
    fn calculate(&self, principal: Money, days: u32) -> Result<Money> {
        calculate_iof(principal, days, self)
    }
}

impl ChargeCalculator for InternationalIofConfig {
    fn calculate(&self, principal: Money, _days: u32) -> Result<Money> {
        calculate_international_iof(principal, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::decimal::Rate;
    use crate::errors::ChargeError;
    use rstest::rstest;

    fn iof_config() -> IofConfig {
        EngineConfig::brazilian_credit_card().iof
    }

    #[rstest]
    #[case::same_day(0, 380)]
    #[case::one_day(1, 388)]
    #[case::thirty_days(30, 626)]
    #[case::a_year(365, 3_373)]
    #[case::cap_engaged(500, 4_080)]
    #[case::far_past_cap(2_000, 4_080)]
    fn test_calculate_iof(#[case] days: u32, #[case] expected: i64) {
        let iof = calculate_iof(Money::from_minor(100_000), days, &iof_config()).unwrap();
        assert_eq!(iof, Money::from_minor(expected));
    }

    #[test]
    fn test_cap_applies_to_sum() {
        // daily part alone (4_100) already exceeds the cap (4_080)
        let config = iof_config();
        let daily = scale_over_days(Money::from_minor(100_000), config.daily_rate, 500).unwrap();
        assert_eq!(daily, Money::from_minor(4_100));

        let iof = calculate_iof(Money::from_minor(100_000), 500, &config).unwrap();
        assert_eq!(iof, Money::from_minor(4_080));
    }

    #[test]
    fn test_iof_is_monotonic_in_days() {
        let config = iof_config();
        let principal = Money::from_minor(73_219);
        let mut previous = Money::ZERO;
        for days in 0..=600 {
            let iof = calculate_iof(principal, days, &config).unwrap();
            assert!(iof >= previous, "iof decreased at day {}", days);
            previous = iof;
        }
    }

    #[test]
    fn test_iof_rejects_negative_principal() {
        let result = calculate_iof(Money::from_minor(-1), 30, &iof_config());
        assert!(matches!(result, Err(ChargeError::NegativeAmount { .. })));
    }

    #[test]
    fn test_iof_rejects_negative_rate() {
        let mut config = iof_config();
        config.daily_rate = Rate::new(-82);
        let result = calculate_iof(Money::from_minor(100_000), 30, &config);
        assert!(matches!(result, Err(ChargeError::InvalidRate { .. })));
    }

    #[rstest]
    #[case::basic_rate(100_000, 3_500)]
    #[case::rounding(12_345, 432)]
    #[case::zero(0, 0)]
    fn test_calculate_international_iof(#[case] amount: i64, #[case] expected: i64) {
        let config = InternationalIofConfig { rate: Rate::new(35_000) };
        let iof = calculate_international_iof(Money::from_minor(amount), &config).unwrap();
        assert_eq!(iof, Money::from_minor(expected));
    }

    #[test]
    fn test_international_iof_ignores_days() {
        let config = InternationalIofConfig { rate: Rate::new(35_000) };
        let principal = Money::from_minor(100_000);
        assert_eq!(
            config.calculate(principal, 0).unwrap(),
            config.calculate(principal, 90).unwrap()
        );
    }
}
