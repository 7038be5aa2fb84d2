/// partial payments - settle charges in waterfall order and carry the rest
use chrono::{TimeZone, Utc};
use credit_charges_rs::{
    AmountDue, EngineConfig, Money, PaymentWaterfall, RotativeBalance, RotativeEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== partial payments ===\n");

    let engine = RotativeEngine::from_config(&EngineConfig::brazilian_credit_card());
    let waterfall = PaymentWaterfall::new();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let first_payment = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let second_payment = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

    let balance = RotativeBalance::new(Money::from_major(1_000)?, start);

    // first statement, partially paid
    let result = engine.calculate(&balance, first_payment)?;
    let applied = waterfall.allocate(&AmountDue::from(&result), Money::from_major(400)?)?;

    println!("due on {}: R$ {}", first_payment.format("%Y-%m-%d"), result.total);
    println!("paid R$ 400.00");
    println!("  iof:            R$ {}", applied.paid_iof);
    println!("  interest:       R$ {}", applied.paid_interest);
    println!("  late interest:  R$ {}", applied.paid_late_interest);
    println!("  late fee:       R$ {}", applied.paid_late_fee);
    println!("  principal:      R$ {}", applied.paid_principal);
    println!("  remaining:      R$ {}", applied.remaining);

    // remaining principal accrues again from the payment date
    let carried = balance.carry_forward(&applied, first_payment);
    let result = engine.calculate(&carried, second_payment)?;
    let applied = waterfall.allocate(&AmountDue::from(&result), result.total)?;

    println!("\ndue on {}: R$ {}", second_payment.format("%Y-%m-%d"), result.total);
    println!("paid in full, remaining R$ {}", applied.remaining);

    Ok(())
}
