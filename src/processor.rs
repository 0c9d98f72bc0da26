use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{info, warn};

use crate::application::LoanApplication;
use crate::config::ProcessorConfig;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::ports::{ExternalService, LoanStore, Notifier};
use crate::repayment::RepaymentCalculator;

/// prices new loan applications and hands them to the collaborators
///
/// Each successful call saves the application exactly once. Applications
/// the calculator rejects are never saved and nobody is notified.
pub struct LoanProcessor<S, N, E> {
    config: ProcessorConfig,
    calculator: RepaymentCalculator,
    store: S,
    notifier: N,
    external: E,
    events: EventStore,
}

impl<S, N, E> LoanProcessor<S, N, E>
where
    S: LoanStore,
    N: Notifier,
    E: ExternalService,
{
    pub fn new(store: S, notifier: N, external: E) -> Self {
        Self {
            config: ProcessorConfig::standard(),
            calculator: RepaymentCalculator::new(),
            store,
            notifier,
            external,
            events: EventStore::new(),
        }
    }

    /// create with an explicit configuration, rejecting contradictory settings
    pub fn with_config(config: ProcessorConfig, store: S, notifier: N, external: E) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new(store, notifier, external)
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn external(&self) -> &E {
        &self.external
    }

    /// process application with system time
    pub fn process_new_application_now(
        &mut self,
        application: LoanApplication,
    ) -> Result<LoanApplication> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.process_new_application(application, &time)
    }

    /// price, save and announce a new application
    pub fn process_new_application(
        &mut self,
        mut application: LoanApplication,
        time_provider: &SafeTimeProvider,
    ) -> Result<LoanApplication> {
        let loan_id = application.id;

        self.events.emit(Event::ApplicationReceived {
            loan_id,
            principal: application.principal,
            term_in_months: application.term_in_months,
            annual_interest_rate: application.annual_interest_rate,
            timestamp: time_provider.now(),
        });

        let result = match self.calculator.calculate(&application.to_request()) {
            Ok(result) => result,
            Err(e) => {
                warn!(loan_id = %loan_id, error = %e, "loan application rejected");
                self.events.emit(Event::ApplicationRejected {
                    loan_id,
                    reason: e.to_string(),
                    timestamp: time_provider.now(),
                });
                return Err(e);
            }
        };

        application.set_repayment(result.monthly_repayment, time_provider.now());
        self.events.emit(Event::RepaymentCalculated {
            loan_id,
            monthly_repayment: result.monthly_repayment,
            total_repayable: result.total_repayable,
            timestamp: time_provider.now(),
        });

        self.store.save(&application)?;
        self.events.emit(Event::ApplicationPersisted {
            loan_id,
            timestamp: time_provider.now(),
        });
        info!(
            loan_id = %loan_id,
            monthly_repayment = %result.monthly_repayment,
            "loan application saved"
        );

        if self.config.notify_applicant {
            match self.notifier.notify(&application) {
                Ok(()) => self.events.emit(Event::ApplicantNotified {
                    loan_id,
                    timestamp: time_provider.now(),
                }),
                Err(e) => {
                    warn!(loan_id = %loan_id, error = %e, "applicant notification failed");
                    self.events.emit(Event::NotificationFailed {
                        loan_id,
                        reason: e.to_string(),
                        timestamp: time_provider.now(),
                    });
                    if self.config.require_notification {
                        return Err(e);
                    }
                }
            }
        }

        if self.config.call_external_service {
            match self.external.call(&application) {
                Ok(()) => self.events.emit(Event::ExternalServiceCalled {
                    loan_id,
                    timestamp: time_provider.now(),
                }),
                Err(e) => {
                    warn!(loan_id = %loan_id, error = %e, "external service call failed");
                    self.events.emit(Event::ExternalServiceFailed {
                        loan_id,
                        reason: e.to_string(),
                        timestamp: time_provider.now(),
                    });
                    if self.config.require_external_service {
                        return Err(e);
                    }
                }
            }
        }

        Ok(application)
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// get events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
