use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::calendar::days_between;
use crate::charges::{
    calculate_iof, calculate_late_fee, calculate_late_interest, calculate_rotative_interest,
};
use crate::config::{
    EngineConfig, InterestConfig, IofConfig, LateFeeConfig, LateInterestConfig,
    RotativeRulesConfig,
};
use crate::decimal::{scale, Money};
use crate::errors::{ensure_non_negative, Result};
use crate::types::{RotativeBalance, RotativeResult};

/// Evaluate the charges accrued on a revolving balance as of `as_of`.
///
/// Interest and IOF accrue over the capped day count even on the start date
/// itself. Late fee and late interest only apply once at least one day has
/// elapsed. When total charges exceed `max_charge_rate` of principal the
/// interest alone is reduced to fit under the cap.
pub fn calculate_rotative(
    balance: &RotativeBalance,
    as_of: DateTime<Utc>,
    iof_config: &IofConfig,
    interest_config: &InterestConfig,
    late_fee_config: &LateFeeConfig,
    late_interest_config: &LateInterestConfig,
    rules: &RotativeRulesConfig,
) -> Result<RotativeResult> {
    ensure_non_negative(balance.principal)?;
    rules.validate()?;

    let principal = balance.principal;
    let days = days_between(balance.start_date, as_of);
    let charged_days = if rules.max_days > 0 {
        days.min(rules.max_days)
    } else {
        days
    };

    let mut interest = calculate_rotative_interest(principal, charged_days, interest_config)?;
    let iof = calculate_iof(principal, charged_days, iof_config)?;

    let (late_fee, late_interest) = if days > 0 {
        (
            calculate_late_fee(principal, late_fee_config)?,
            calculate_late_interest(principal, charged_days, late_interest_config)?,
        )
    } else {
        (Money::ZERO, Money::ZERO)
    };

    let fixed = Money::checked_sum([iof, late_fee, late_interest])?;
    let mut charges = interest.checked_add(fixed)?;
    let mut charge_capped = false;

    if rules.max_charge_rate.is_positive() {
        let max_charges = scale(principal, rules.max_charge_rate)?;
        if charges > max_charges {
            interest = max_charges.checked_sub(fixed)?.max(Money::ZERO);
            charges = interest.checked_add(fixed)?;
            charge_capped = true;

            tracing::debug!(
                %max_charges,
                %interest,
                "rotative charges capped, interest reduced"
            );
        }
    }

    tracing::debug!(
        %principal,
        days,
        charged_days,
        %charges,
        charge_capped,
        "rotative charges computed"
    );

    Ok(RotativeResult {
        principal,
        interest,
        iof,
        late_fee,
        late_interest,
        charges,
        total: principal.checked_add(charges)?,
        days,
        charged_days,
        charge_capped,
    })
}

/// engine for revolving balance accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotativeEngine {
    pub iof: IofConfig,
    pub interest: InterestConfig,
    pub late_fee: LateFeeConfig,
    pub late_interest: LateInterestConfig,
    pub rules: RotativeRulesConfig,
}

impl RotativeEngine {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            iof: config.iof,
            interest: config.interest,
            late_fee: config.late_fee,
            late_interest: config.late_interest,
            rules: config.rules,
        }
    }

    /// accrual snapshot at an explicit date
    pub fn calculate(&self, balance: &RotativeBalance, as_of: DateTime<Utc>) -> Result<RotativeResult> {
        calculate_rotative(
            balance,
            as_of,
            &self.iof,
            &self.interest,
            &self.late_fee,
            &self.late_interest,
            &self.rules,
        )
    }

    /// accrual snapshot at the provider's current time
    pub fn calculate_now(
        &self,
        balance: &RotativeBalance,
        time_provider: &SafeTimeProvider,
    ) -> Result<RotativeResult> {
        self.calculate(balance, time_provider.now())
    }
}
