pub mod calendar;
pub mod charges;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod installments;
pub mod payments;
pub mod rotative;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate, RATE_DENOMINATOR};
pub use errors::{ChargeError, Result};
pub use charges::{
    calculate_international_iof, calculate_iof, calculate_late_fee, calculate_late_interest,
    calculate_rotative_interest, ChargeCalculator,
};
pub use config::{
    EngineConfig, InstallmentConfig, InterestConfig, InternationalIofConfig, IofConfig,
    LateFeeConfig, LateInterestConfig, RotativeRulesConfig,
};
pub use installments::{calculate_installment_plan, calculate_pmt, InstallmentPlanner};
pub use payments::{apply_payment, AmountDue, ChargeCategory, PaymentWaterfall, WATERFALL_ORDER};
pub use rotative::{calculate_rotative, RotativeEngine};
pub use types::{
    AmortizationResult, Installment, InstallmentPlan, RotativeBalance, RotativeResult,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
