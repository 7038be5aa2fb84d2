/// installments - interest-free split versus a price table plan
use chrono::{TimeZone, Utc};
use credit_charges_rs::{EngineConfig, InstallmentPlan, InstallmentPlanner, Money, Rate};

fn print_plan(plan: &InstallmentPlan) {
    for installment in &plan.installments {
        println!(
            "  {:>2}  {}  principal R$ {:>9}  interest R$ {:>8}  iof R$ {:>6}  amount R$ {:>9}",
            installment.number,
            installment.due_date.format("%Y-%m-%d"),
            installment.principal,
            installment.interest,
            installment.iof,
            installment.amount,
        );
    }
    println!("  total interest: R$ {}", plan.total_interest);
    println!("  total iof:      R$ {}", plan.total_iof);
    println!("  total:          R$ {}", plan.total_with_iof);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let purchase = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let first_due = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    let amount = Money::from_major(1_200)?;

    let config = EngineConfig::brazilian_credit_card();

    println!("=== 3x interest-free ===");
    let planner = InstallmentPlanner::from_config(&config);
    print_plan(&planner.plan(amount, 3, purchase, first_due)?);

    println!("\n=== 12x at 1.99% per month ===");
    let planner = InstallmentPlanner::from_config(&config.with_installment_rate(Rate::from_bps(199)));
    print_plan(&planner.plan(amount, 12, purchase, first_due)?);

    Ok(())
}
