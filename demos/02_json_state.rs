/// json state - application and configuration serialization
use chrono::{TimeZone, Utc};
use loan_repayment_rs::{
    InMemoryLoanStore, LoanApplication, LoanProcessor, Money, ProcessorConfig, Rate,
    RecordingExternalService, RecordingNotifier, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state serialization ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));

    let config = ProcessorConfig::from_json(r#"{ "call_external_service": true }"#)?;
    println!("processor config:");
    println!("-----------------");
    println!("{}\n", config.to_json()?);

    let application = LoanApplication::builder()
        .applicant("Mary")
        .principal(Money::from_major(1_200))
        .term_months(24)
        .rate(Rate::from_percentage(10))
        .build_with_time(&time)?;

    println!("stage 1: submitted");
    println!("------------------");
    println!("{}\n", application.json());

    let mut processor = LoanProcessor::with_config(
        config,
        InMemoryLoanStore::new(),
        RecordingNotifier::new(),
        RecordingExternalService::new(),
    )?;
    let priced = processor.process_new_application(application, &time)?;

    println!("stage 2: priced and saved");
    println!("-------------------------");
    println!("{}\n", priced.json());

    println!("events:");
    println!("-------");
    println!("{}", serde_json::to_string_pretty(&processor.take_events())?);

    Ok(())
}
