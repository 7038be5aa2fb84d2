use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ensure_non_negative, ChargeError, Result};
use crate::types::AmortizationResult;

use super::AmountDue;

/// charge categories a payment can settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeCategory {
    Iof,
    Interest,
    LateInterest,
    LateFee,
    Principal,
}

/// bank-mandated settlement order
pub const WATERFALL_ORDER: [ChargeCategory; 5] = [
    ChargeCategory::Iof,
    ChargeCategory::Interest,
    ChargeCategory::LateInterest,
    ChargeCategory::LateFee,
    ChargeCategory::Principal,
];

/// Applies a single payment across charge categories in [`WATERFALL_ORDER`].
///
/// Payment beyond the amount due is not consumed. It is reported in
/// [`AmortizationResult::excess`] and never reduces `remaining` below zero;
/// refunding it is up to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentWaterfall;

impl PaymentWaterfall {
    pub fn new() -> Self {
        Self
    }

    /// allocate a payment against a breakdown whose total is its component sum
    pub fn allocate(&self, due: &AmountDue, payment: Money) -> Result<AmortizationResult> {
        self.allocate_against(due.total()?, due, payment)
    }

    /// allocate a payment, tracking `total_due` as the running unpaid amount
    pub fn allocate_against(
        &self,
        total_due: Money,
        due: &AmountDue,
        payment: Money,
    ) -> Result<AmortizationResult> {
        ensure_non_negative(payment)?;
        due.validate()?;

        let components = due.total()?;
        if total_due < components {
            return Err(ChargeError::InconsistentAmountDue {
                total: total_due,
                components,
            });
        }

        let mut available = payment;
        let mut result = AmortizationResult {
            remaining: total_due,
            ..Default::default()
        };

        for category in WATERFALL_ORDER {
            if !available.is_positive() {
                break;
            }

            let paid = available.min(due.get(category));
            *paid_field(&mut result, category) = paid;
            available -= paid;
            result.remaining -= paid;
        }

        result.excess = available;
        if result.excess.is_positive() {
            tracing::debug!(
                %payment,
                excess = %result.excess,
                "payment exceeds amount due, surplus not allocated"
            );
        }

        Ok(result)
    }
}

fn paid_field(result: &mut AmortizationResult, category: ChargeCategory) -> &mut Money {
    match category {
        ChargeCategory::Iof => &mut result.paid_iof,
        ChargeCategory::Interest => &mut result.paid_interest,
        ChargeCategory::LateInterest => &mut result.paid_late_interest,
        ChargeCategory::LateFee => &mut result.paid_late_fee,
        ChargeCategory::Principal => &mut result.paid_principal,
    }
}

/// Apply `payment` in the order IOF, interest, late interest, late fee, principal.
pub fn apply_payment(
    total_due: Money,
    iof_due: Money,
    interest_due: Money,
    late_interest_due: Money,
    late_fee_due: Money,
    principal_due: Money,
    payment: Money,
) -> Result<AmortizationResult> {
    let due = AmountDue {
        iof: iof_due,
        interest: interest_due,
        late_interest: late_interest_due,
        late_fee: late_fee_due,
        principal: principal_due,
    };

    PaymentWaterfall::new().allocate_against(total_due, &due, payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn due() -> AmountDue {
        AmountDue {
            iof: Money::from_minor(6_000),
            interest: Money::from_minor(14_000),
            late_interest: Money::from_minor(1_000),
            late_fee: Money::from_minor(2_000),
            principal: Money::from_minor(100_000),
        }
    }

    #[rstest]
    #[case::nothing_paid(0, [0, 0, 0, 0, 0], 123_000, 0)]
    #[case::covers_iof_only(5_000, [5_000, 0, 0, 0, 0], 118_000, 0)]
    #[case::covers_iof_and_interest(20_000, [6_000, 14_000, 0, 0, 0], 103_000, 0)]
    #[case::stops_inside_late_fee(22_000, [6_000, 14_000, 1_000, 1_000, 0], 101_000, 0)]
    #[case::reaches_principal(40_000, [6_000, 14_000, 1_000, 2_000, 17_000], 83_000, 0)]
    #[case::exact_total(123_000, [6_000, 14_000, 1_000, 2_000, 100_000], 0, 0)]
    #[case::exceeds_total(200_000, [6_000, 14_000, 1_000, 2_000, 100_000], 0, 77_000)]
    fn test_apply_payment(
        #[case] payment: i64,
        #[case] paid: [i64; 5],
        #[case] remaining: i64,
        #[case] excess: i64,
    ) {
        let d = due();
        let result = apply_payment(
            Money::from_minor(123_000),
            d.iof,
            d.interest,
            d.late_interest,
            d.late_fee,
            d.principal,
            Money::from_minor(payment),
        )
        .unwrap();

        assert_eq!(result.paid_iof, Money::from_minor(paid[0]));
        assert_eq!(result.paid_interest, Money::from_minor(paid[1]));
        assert_eq!(result.paid_late_interest, Money::from_minor(paid[2]));
        assert_eq!(result.paid_late_fee, Money::from_minor(paid[3]));
        assert_eq!(result.paid_principal, Money::from_minor(paid[4]));
        assert_eq!(result.remaining, Money::from_minor(remaining));
        assert_eq!(result.excess, Money::from_minor(excess));
    }

    #[test]
    fn test_allocate_uses_component_total() {
        let result = PaymentWaterfall::new().allocate(&due(), Money::from_minor(40_000)).unwrap();
        assert_eq!(result.remaining, Money::from_minor(83_000));
        assert_eq!(result.total_paid(), Money::from_minor(40_000));
    }

    #[test]
    fn test_rejects_negative_payment() {
        let result = PaymentWaterfall::new().allocate(&due(), Money::from_minor(-1));
        assert!(matches!(result, Err(ChargeError::NegativeAmount { .. })));
    }

    #[test]
    fn test_rejects_total_below_components() {
        let result = PaymentWaterfall::new().allocate_against(
            Money::from_minor(1_000),
            &due(),
            Money::from_minor(500),
        );
        assert!(matches!(result, Err(ChargeError::InconsistentAmountDue { .. })));
    }

    #[test]
    fn test_component_overflow_is_reported() {
        let half = Money::from_minor(i64::MAX / 2 + 1);
        let result = apply_payment(
            Money::from_minor(i64::MAX),
            half,
            half,
            Money::ZERO,
            Money::ZERO,
            Money::ZERO,
            Money::from_minor(1_000),
        );
        assert!(matches!(result, Err(ChargeError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn test_zero_categories_are_skipped() {
        let due = AmountDue {
            interest: Money::from_minor(500),
            principal: Money::from_minor(1_000),
            ..Default::default()
        };
        let result = PaymentWaterfall::new().allocate(&due, Money::from_minor(800)).unwrap();

        assert_eq!(result.paid_iof, Money::ZERO);
        assert_eq!(result.paid_interest, Money::from_minor(500));
        assert_eq!(result.paid_principal, Money::from_minor(300));
        assert_eq!(result.remaining, Money::from_minor(700));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn waterfall_conserves_money(
                components in proptest::array::uniform5(0i64..1_000_000i64),
                payment in 0i64..6_000_000i64,
            ) {
                let due = AmountDue {
                    iof: Money::from_minor(components[0]),
                    interest: Money::from_minor(components[1]),
                    late_interest: Money::from_minor(components[2]),
                    late_fee: Money::from_minor(components[3]),
                    principal: Money::from_minor(components[4]),
                };
                let payment = Money::from_minor(payment);
                let total = due.total().unwrap();

                let result = PaymentWaterfall::new().allocate(&due, payment).unwrap();

                prop_assert_eq!(result.total_paid(), payment.min(total));
                prop_assert_eq!(result.remaining, total - result.total_paid());
                prop_assert_eq!(result.excess, payment - result.total_paid());
                prop_assert!(result.remaining >= Money::ZERO);

                // a category is only touched once every earlier one is settled
                for pair in WATERFALL_ORDER.windows(2) {
                    if result.paid(pair[1]).is_positive() {
                        prop_assert_eq!(result.paid(pair[0]), due.get(pair[0]));
                    }
                }
            }
        }
    }
}
