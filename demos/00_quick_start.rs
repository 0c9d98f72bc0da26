/// quick start - minimal example to get started
use loan_repayment_rs::{compute_monthly_repayment, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // £1,200 over 12 months at 10%
    let monthly = compute_monthly_repayment(Money::from_major(1200), 12, Rate::from_percentage(10))?;

    println!("monthly repayment: £{}", monthly);

    Ok(())
}
