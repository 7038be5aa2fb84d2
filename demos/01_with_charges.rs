/// with charges - thirty days of revolving accrual, then two months more
use chrono::{Duration, TimeZone, Utc};
use credit_charges_rs::{
    EngineConfig, Money, RotativeBalance, RotativeEngine, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== revolving charges ===\n");

    let config = EngineConfig::brazilian_credit_card();
    let engine = RotativeEngine::from_config(&config);

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let controller = time.test_control().unwrap();

    let balance = RotativeBalance::new(Money::from_major(1_000)?, start);
    println!("balance of R$ {} from {}", balance.principal, start.format("%Y-%m-%d"));

    controller.advance(Duration::days(30));
    let result = engine.calculate_now(&balance, &time)?;

    println!("\nas of {}", time.now().format("%Y-%m-%d"));
    println!("  interest:       R$ {}", result.interest);
    println!("  iof:            R$ {}", result.iof);
    println!("  late fee:       R$ {}", result.late_fee);
    println!("  late interest:  R$ {}", result.late_interest);
    println!("  charges:        R$ {}", result.charges);
    println!("  total:          R$ {}", result.total);

    // accrual stops at the configured day cap
    controller.advance(Duration::days(60));
    let later = engine.calculate_now(&balance, &time)?;

    println!("\nas of {}", time.now().format("%Y-%m-%d"));
    println!("  days elapsed:   {}", later.days);
    println!("  days charged:   {}", later.charged_days);
    println!("  total:          R$ {}", later.total);

    println!("\n{}", serde_json::to_string_pretty(&later)?);

    Ok(())
}
