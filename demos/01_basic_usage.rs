/// basic usage - price an application, save it and notify the applicant
use loan_repayment_rs::{
    InMemoryLoanStore, LoanApplication, LoanProcessor, LogNotifier, Money, NoopExternalService,
    Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== basic usage example ===\n");

    let mut processor = LoanProcessor::new(InMemoryLoanStore::new(), LogNotifier, NoopExternalService);

    let application = LoanApplication::builder()
        .applicant("Rachid")
        .principal(Money::from_major(5_000))
        .term_months(60)
        .rate(Rate::from_percent(dec!(6.5)))
        .build()?;

    let priced = processor.process_new_application_now(application)?;

    if let Some(repayment) = priced.repayment {
        println!("monthly repayment: £{}", repayment);
    }
    println!("applications stored: {}", processor.store().len());

    for event in processor.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
