/// rejections - invalid terms never reach the store
use loan_repayment_rs::{
    InMemoryLoanStore, LoanApplication, LoanError, LoanProcessor, Money, Rate, RecordingNotifier,
    NoopExternalService,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== rejection example ===\n");

    let mut processor = LoanProcessor::new(
        InMemoryLoanStore::new(),
        RecordingNotifier::new(),
        NoopExternalService,
    );

    let cases = [
        ("zero term", Money::from_major(100), 0, Rate::from_percentage(5)),
        ("negative principal", Money::from_major(-50), 12, Rate::from_percentage(5)),
        ("valid", Money::from_major(1_200), 12, Rate::from_percentage(10)),
    ];

    for (label, principal, term, rate) in cases {
        let application = LoanApplication::builder()
            .applicant(label)
            .principal(principal)
            .term_months(term)
            .rate(rate)
            .build()?;

        match processor.process_new_application_now(application) {
            Ok(priced) => {
                if let Some(repayment) = priced.repayment {
                    println!("{}: priced at £{}", label, repayment);
                }
            }
            Err(e @ (LoanError::InvalidTerm { .. } | LoanError::InvalidAmount { .. })) => {
                println!("{}: rejected ({})", label, e)
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nsaved: {}", processor.store().save_count());
    println!("notified: {}", processor.notifier().delivered().len());

    Ok(())
}
