use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::LoanId;

/// all events that can be emitted while processing an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ApplicationReceived {
        loan_id: LoanId,
        principal: Money,
        term_in_months: i32,
        annual_interest_rate: Rate,
        timestamp: DateTime<Utc>,
    },
    ApplicationRejected {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    RepaymentCalculated {
        loan_id: LoanId,
        monthly_repayment: Money,
        total_repayable: Money,
        timestamp: DateTime<Utc>,
    },
    ApplicationPersisted {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },

    // collaborator events
    ApplicantNotified {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    NotificationFailed {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    ExternalServiceCalled {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    ExternalServiceFailed {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn loan_id(&self) -> LoanId {
        match self {
            Event::ApplicationReceived { loan_id, .. }
            | Event::ApplicationRejected { loan_id, .. }
            | Event::RepaymentCalculated { loan_id, .. }
            | Event::ApplicationPersisted { loan_id, .. }
            | Event::ApplicantNotified { loan_id, .. }
            | Event::NotificationFailed { loan_id, .. }
            | Event::ExternalServiceCalled { loan_id, .. }
            | Event::ExternalServiceFailed { loan_id, .. } => *loan_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_events_drains_store() {
        let loan_id = Uuid::new_v4();
        let mut store = EventStore::new();

        store.emit(Event::ApplicationPersisted {
            loan_id,
            timestamp: Utc::now(),
        });
        store.emit(Event::ApplicantNotified {
            loan_id,
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 2);

        let taken = store.take_events();
        assert_eq!(taken.len(), 2);
        assert!(taken.iter().all(|e| e.loan_id() == loan_id));
        assert!(store.events().is_empty());
    }
}
