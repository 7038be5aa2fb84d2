use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::ChargeCategory;

/// balance carried into revolving credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotativeBalance {
    pub principal: Money,
    /// date accrual begins
    pub start_date: DateTime<Utc>,
}

impl RotativeBalance {
    pub fn new(principal: Money, start_date: DateTime<Utc>) -> Self {
        Self { principal, start_date }
    }

    /// Balance left after a partial payment, accruing again from `payment_date`.
    ///
    /// Only principal carries over; charges settled or not by the payment are
    /// the ledger's concern.
    pub fn carry_forward(&self, payment: &AmortizationResult, payment_date: DateTime<Utc>) -> Self {
        Self {
            principal: self.principal - payment.paid_principal,
            start_date: payment_date,
        }
    }
}

/// audit snapshot of one revolving accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotativeResult {
    pub principal: Money,
    pub interest: Money,
    pub iof: Money,
    pub late_fee: Money,
    pub late_interest: Money,
    /// interest + iof + late fee + late interest
    pub charges: Money,
    /// principal + charges
    pub total: Money,
    /// days elapsed since the balance start date
    pub days: u32,
    /// days actually charged after the day cap
    pub charged_days: u32,
    /// interest was reduced to respect the charge cap
    pub charge_capped: bool,
}

/// single installment of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the plan
    pub number: u32,
    pub due_date: DateTime<Utc>,
    pub principal: Money,
    pub interest: Money,
    pub iof: Money,
    /// principal + interest + iof
    pub amount: Money,
}

/// full installment schedule for a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub total_amount: Money,
    pub total_iof: Money,
    pub total_interest: Money,
    /// total amount + total interest + total iof
    pub total_with_iof: Money,
    pub installments: Vec<Installment>,
}

impl InstallmentPlan {
    /// get installment by 1-based number
    pub fn get(&self, number: u32) -> Option<&Installment> {
        number
            .checked_sub(1)
            .and_then(|i| self.installments.get(i as usize))
    }

    pub fn principal_sum(&self) -> Money {
        self.installments.iter().map(|i| i.principal).sum()
    }
}

/// how a payment was applied across charge categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AmortizationResult {
    pub paid_iof: Money,
    pub paid_interest: Money,
    pub paid_late_interest: Money,
    pub paid_late_fee: Money,
    pub paid_principal: Money,
    /// total due still unpaid
    pub remaining: Money,
    /// part of the payment not consumed by any category
    pub excess: Money,
}

impl AmortizationResult {
    /// amount settled in one category
    pub fn paid(&self, category: ChargeCategory) -> Money {
        match category {
            ChargeCategory::Iof => self.paid_iof,
            ChargeCategory::Interest => self.paid_interest,
            ChargeCategory::LateInterest => self.paid_late_interest,
            ChargeCategory::LateFee => self.paid_late_fee,
            ChargeCategory::Principal => self.paid_principal,
        }
    }

    pub fn total_paid(&self) -> Money {
        self.paid_iof
            + self.paid_interest
            + self.paid_late_interest
            + self.paid_late_fee
            + self.paid_principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_carry_forward() {
        let balance = RotativeBalance::new(
            Money::from_minor(100_000),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let payment = AmortizationResult {
            paid_iof: Money::from_minor(380),
            paid_interest: Money::from_minor(3_600),
            paid_principal: Money::from_minor(36_020),
            ..Default::default()
        };
        let paid_on = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let next = balance.carry_forward(&payment, paid_on);

        assert_eq!(next.principal, Money::from_minor(63_980));
        assert_eq!(next.start_date, paid_on);
    }

    #[test]
    fn test_total_paid() {
        let result = AmortizationResult {
            paid_iof: Money::from_minor(6_000),
            paid_interest: Money::from_minor(14_000),
            paid_late_interest: Money::from_minor(1_000),
            paid_late_fee: Money::from_minor(2_000),
            paid_principal: Money::from_minor(17_000),
            remaining: Money::from_minor(83_000),
            excess: Money::ZERO,
        };
        assert_eq!(result.total_paid(), Money::from_minor(40_000));
    }

    #[test]
    fn test_plan_lookup_is_one_based() {
        let due = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        let installment = Installment {
            number: 1,
            due_date: due,
            principal: Money::from_minor(500),
            interest: Money::ZERO,
            iof: Money::from_minor(2),
            amount: Money::from_minor(502),
        };
        let plan = InstallmentPlan {
            total_amount: Money::from_minor(500),
            total_iof: Money::from_minor(2),
            total_interest: Money::ZERO,
            total_with_iof: Money::from_minor(502),
            installments: vec![installment],
        };

        assert_eq!(plan.get(1), Some(&installment));
        assert_eq!(plan.get(0), None);
        assert_eq!(plan.get(2), None);
        assert_eq!(plan.principal_sum(), Money::from_minor(500));
    }
}
