pub mod application;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ports;
pub mod processor;
pub mod repayment;
pub mod types;

// re-export key types
pub use application::{LoanApplication, LoanApplicationBuilder};
pub use config::ProcessorConfig;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use ports::{
    ExternalService, InMemoryLoanStore, LoanStore, LogNotifier, NoopExternalService, Notifier,
    RecordingExternalService, RecordingNotifier,
};
pub use processor::LoanProcessor;
pub use repayment::{compute_monthly_repayment, LoanRequest, RepaymentCalculator, RepaymentResult};
pub use types::{ApplicationStatus, LoanField, LoanId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
