use chrono::{DateTime, Utc};

use crate::calendar::{add_months, days_between};
use crate::charges::calculate_iof;
use crate::config::{EngineConfig, InstallmentConfig, IofConfig};
use crate::decimal::{fixed_pow, scale, Money, Rate, RATE_DENOMINATOR};
use crate::errors::{ensure_non_negative, ChargeError, Result};
use crate::types::{Installment, InstallmentPlan};

/// Generate the installment schedule for a purchase.
///
/// A zero monthly rate splits the amount equally, with leftover centavos on
/// the first installment. Otherwise the plan follows the Price table: a fixed
/// payment whose interest/principal split shifts over time, with the last
/// installment absorbing the rounding so the balance reaches exactly zero.
/// Each installment carries its own IOF, accrued from the purchase date to its
/// due date.
pub fn calculate_installment_plan(
    total_amount: Money,
    count: u32,
    purchase_date: DateTime<Utc>,
    first_due_date: DateTime<Utc>,
    iof_config: &IofConfig,
    installment_config: &InstallmentConfig,
) -> Result<InstallmentPlan> {
    ensure_non_negative(total_amount)?;
    installment_config.validate()?;
    if count == 0 {
        return Err(ChargeError::InvalidInstallmentCount { count });
    }
    if first_due_date < purchase_date {
        return Err(ChargeError::InvalidDate {
            message: format!(
                "first due date {} precedes purchase date {}",
                first_due_date, purchase_date
            ),
        });
    }

    let schedule = Schedule {
        purchase_date,
        first_due_date,
        iof_config,
    };

    let installments = if installment_config.monthly_rate.is_positive() {
        schedule.price(total_amount, count, installment_config.monthly_rate)?
    } else {
        schedule.interest_free(total_amount, count)?
    };

    let total_iof = Money::checked_sum(installments.iter().map(|i| i.iof))?;
    let total_interest = Money::checked_sum(installments.iter().map(|i| i.interest))?;

    tracing::debug!(
        %total_amount,
        count,
        %total_interest,
        %total_iof,
        "installment plan generated"
    );

    Ok(InstallmentPlan {
        total_amount,
        total_iof,
        total_interest,
        total_with_iof: Money::checked_sum([total_amount, total_interest, total_iof])?,
        installments,
    })
}

/// Fixed Price-table payment: `total * r * (1+r)^n / ((1+r)^n - 1)`, half-up.
pub fn calculate_pmt(total_amount: Money, monthly_rate: Rate, count: u32) -> Result<Money> {
    let denominator = i128::from(RATE_DENOMINATOR);
    let growth = i128::from(fixed_pow(monthly_rate, count)?.numerator());

    let pmt_denominator = (growth - denominator)
        .checked_mul(denominator)
        .ok_or_else(|| ChargeError::overflow("pmt"))?;
    if pmt_denominator <= 0 {
        return Err(ChargeError::CalculationError {
            message: format!("degenerate pmt growth factor {} for rate {}", growth, monthly_rate),
        });
    }

    let numerator = i128::from(total_amount.as_minor())
        .checked_mul(i128::from(monthly_rate.numerator()))
        .and_then(|n| n.checked_mul(growth))
        .and_then(|n| n.checked_add(pmt_denominator / 2))
        .ok_or_else(|| ChargeError::overflow("pmt"))?;

    i64::try_from(numerator / pmt_denominator)
        .map(Money::from_minor)
        .map_err(|_| ChargeError::overflow("pmt"))
}

/// planner bound to an iof and installment rate configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPlanner {
    pub iof: IofConfig,
    pub installment: InstallmentConfig,
}

impl InstallmentPlanner {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            iof: config.iof,
            installment: config.installment,
        }
    }

    pub fn plan(
        &self,
        total_amount: Money,
        count: u32,
        purchase_date: DateTime<Utc>,
        first_due_date: DateTime<Utc>,
    ) -> Result<InstallmentPlan> {
        calculate_installment_plan(
            total_amount,
            count,
            purchase_date,
            first_due_date,
            &self.iof,
            &self.installment,
        )
    }
}

struct Schedule<'a> {
    purchase_date: DateTime<Utc>,
    first_due_date: DateTime<Utc>,
    iof_config: &'a IofConfig,
}

impl Schedule<'_> {
    fn installment(&self, index: u32, principal: Money, interest: Money) -> Result<Installment> {
        let due_date = add_months(self.first_due_date, index)?;
        let days = days_between(self.purchase_date, due_date);
        let iof = calculate_iof(principal, days, self.iof_config)?;

        Ok(Installment {
            number: index + 1,
            due_date,
            principal,
            interest,
            iof,
            amount: Money::checked_sum([principal, interest, iof])?,
        })
    }

    fn interest_free(&self, total_amount: Money, count: u32) -> Result<Vec<Installment>> {
        let n = i64::from(count);
        let base = total_amount.as_minor() / n;
        let remainder = total_amount.as_minor() - base * n;

        (0..count)
            .map(|i| {
                let principal = if i == 0 { base + remainder } else { base };
                self.installment(i, Money::from_minor(principal), Money::ZERO)
            })
            .collect()
    }

    fn price(&self, total_amount: Money, count: u32, monthly_rate: Rate) -> Result<Vec<Installment>> {
        let pmt = calculate_pmt(total_amount, monthly_rate, count)?;
        let mut balance = total_amount;
        let mut installments = Vec::with_capacity(count as usize);

        for i in 0..count {
            let mut interest = scale(balance, monthly_rate)?;
            let mut principal = pmt - interest;

            // last installment settles whatever balance rounding left behind
            if i == count - 1 {
                principal = balance;
                interest = pmt - principal;
                if interest.is_negative() {
                    interest = scale(balance, monthly_rate)?;
                }
            }

            if principal.is_negative() {
                return Err(ChargeError::CalculationError {
                    message: format!(
                        "rounding exhausted the balance before installment {} of {}",
                        i + 1,
                        count
                    ),
                });
            }

            installments.push(self.installment(i, principal, interest)?);
            balance -= principal;
        }

        tracing::trace!(%pmt, %balance, "price schedule amortized");
        Ok(installments)
    }
}
