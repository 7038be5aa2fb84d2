use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{ChargeError, Result};

/// engine configuration, one entry per charge type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub iof: IofConfig,
    pub interest: InterestConfig,
    pub late_fee: LateFeeConfig,
    pub late_interest: LateInterestConfig,
    pub rules: RotativeRulesConfig,
    pub international_iof: InternationalIofConfig,
    pub installment: InstallmentConfig,
}

/// transaction tax on credit principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IofConfig {
    /// charged per elapsed day
    pub daily_rate: Rate,
    /// flat surcharge, independent of days
    pub additional_rate: Rate,
    /// cap on daily + additional, proportional to principal
    pub max_annual_rate: Rate,
}

/// revolving interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestConfig {
    pub monthly_rate: Rate,
}

/// one-time late payment fee, a non-positive rate charges nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeeConfig {
    pub rate: Rate,
}

/// late payment interest, a non-positive rate charges nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateInterestConfig {
    pub monthly_rate: Rate,
}

/// caps on revolving accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotativeRulesConfig {
    /// maximum days of accrual charged, 0 disables the cap
    pub max_days: u32,
    /// maximum total charges as a fraction of principal, 0 disables the cap
    pub max_charge_rate: Rate,
}

/// tax on international purchases, per transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalIofConfig {
    pub rate: Rate,
}

/// installment interest, zero for interest-free plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentConfig {
    pub monthly_rate: Rate,
}

fn non_negative(field: &'static str, rate: Rate) -> Result<()> {
    if rate.is_negative() {
        return Err(ChargeError::InvalidRate { field, rate });
    }
    Ok(())
}

impl IofConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("iof.daily_rate", self.daily_rate)?;
        non_negative("iof.additional_rate", self.additional_rate)?;
        non_negative("iof.max_annual_rate", self.max_annual_rate)
    }
}

impl InterestConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("interest.monthly_rate", self.monthly_rate)
    }
}

impl RotativeRulesConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("rules.max_charge_rate", self.max_charge_rate)
    }
}

impl InternationalIofConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("international_iof.rate", self.rate)
    }
}

impl InstallmentConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("installment.monthly_rate", self.monthly_rate)
    }
}

impl EngineConfig {
    /// brazilian credit card defaults: 0.0082% daily iof + 0.38% flat capped
    /// at 4.08%, 12% monthly revolving interest, 2% late fee, 1% monthly late
    /// interest, 30 charged days, charges capped at 100% of principal, 3.5%
    /// international iof, interest-free installments
    pub fn brazilian_credit_card() -> Self {
        Self {
            iof: IofConfig {
                daily_rate: Rate::new(82),
                additional_rate: Rate::new(3_800),
                max_annual_rate: Rate::new(40_800),
            },
            interest: InterestConfig {
                monthly_rate: Rate::new(120_000),
            },
            late_fee: LateFeeConfig {
                rate: Rate::new(20_000),
            },
            late_interest: LateInterestConfig {
                monthly_rate: Rate::new(10_000),
            },
            rules: RotativeRulesConfig {
                max_days: 30,
                max_charge_rate: Rate::ONE,
            },
            international_iof: InternationalIofConfig {
                rate: Rate::new(35_000),
            },
            installment: InstallmentConfig {
                monthly_rate: Rate::ZERO,
            },
        }
    }

    /// same defaults with interest-bearing installments at the given monthly rate
    pub fn with_installment_rate(mut self, monthly_rate: Rate) -> Self {
        self.installment.monthly_rate = monthly_rate;
        self
    }

    /// parse configuration from json and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// reject negative rates, except the late charges where they disable the charge
    pub fn validate(&self) -> Result<()> {
        self.iof.validate()?;
        self.interest.validate()?;
        self.rules.validate()?;
        self.international_iof.validate()?;
        self.installment.validate()
    }
}
