/// on time - a balance evaluated on its start date carries only the flat iof
use chrono::{TimeZone, Utc};
use credit_charges_rs::{EngineConfig, Money, RotativeBalance, RotativeEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::brazilian_credit_card();
    let engine = RotativeEngine::from_config(&config);

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let balance = RotativeBalance::new(Money::from_major(1_000)?, start);

    let result = engine.calculate(&balance, start)?;

    println!("principal:     R$ {}", result.principal);
    println!("days elapsed:  {}", result.days);
    println!("interest:      R$ {}", result.interest);
    println!("iof:           R$ {}", result.iof);
    println!("late fee:      R$ {}", result.late_fee);
    println!("total:         R$ {}", result.total);

    Ok(())
}
