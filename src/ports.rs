use std::collections::HashMap;

use tracing::info;

use crate::application::LoanApplication;
use crate::errors::{LoanError, Result};
use crate::types::LoanId;

/// persistence for loan applications
pub trait LoanStore {
    /// insert or replace the application keyed by its id
    fn save(&mut self, application: &LoanApplication) -> Result<()>;

    fn find(&self, id: LoanId) -> Option<LoanApplication>;

    /// remove every stored application
    fn delete_all(&mut self) -> Result<()>;
}

/// delivery of "your loan has been priced" messages
pub trait Notifier {
    fn notify(&mut self, application: &LoanApplication) -> Result<()>;
}

/// outbound call made after an application is priced
pub trait ExternalService {
    fn call(&mut self, application: &LoanApplication) -> Result<()>;
}

/// in-memory loan store that counts its writes
#[derive(Debug, Default)]
pub struct InMemoryLoanStore {
    applications: HashMap<LoanId, LoanApplication>,
    save_count: usize,
    delete_all_count: usize,
    fail_saves: bool,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// make every subsequent save fail
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn delete_all_count(&self) -> usize {
        self.delete_all_count
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl LoanStore for InMemoryLoanStore {
    fn save(&mut self, application: &LoanApplication) -> Result<()> {
        if self.fail_saves {
            return Err(LoanError::Store {
                message: format!("store unavailable, could not save {}", application.id),
            });
        }

        self.save_count += 1;
        self.applications.insert(application.id, application.clone());
        Ok(())
    }

    fn find(&self, id: LoanId) -> Option<LoanApplication> {
        self.applications.get(&id).cloned()
    }

    fn delete_all(&mut self) -> Result<()> {
        self.delete_all_count += 1;
        self.applications.clear();
        Ok(())
    }
}

/// notifier that writes a log record per priced application
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, application: &LoanApplication) -> Result<()> {
        let repayment = application.repayment.ok_or_else(|| LoanError::Notification {
            message: format!("application {} has no repayment to report", application.id),
        })?;

        info!(
            loan_id = %application.id,
            applicant = %application.applicant_name,
            monthly_repayment = %repayment,
            term_in_months = application.term_in_months,
            "loan application priced"
        );
        Ok(())
    }
}

/// notifier that keeps every delivered application
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Vec<LoanApplication>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// reject every delivery
    pub fn failing() -> Self {
        Self {
            delivered: Vec::new(),
            fail: true,
        }
    }

    pub fn delivered(&self) -> &[LoanApplication] {
        &self.delivered
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, application: &LoanApplication) -> Result<()> {
        if self.fail {
            return Err(LoanError::Notification {
                message: format!("mail relay refused message for {}", application.id),
            });
        }

        self.delivered.push(application.clone());
        Ok(())
    }
}

/// external service stand-in that records the ids it was called with
#[derive(Debug, Default)]
pub struct RecordingExternalService {
    calls: Vec<LoanId>,
    fail: bool,
}

impl RecordingExternalService {
    pub fn new() -> Self {
        Self::default()
    }

    /// reject every call
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    pub fn calls(&self) -> &[LoanId] {
        &self.calls
    }
}

impl ExternalService for RecordingExternalService {
    fn call(&mut self, application: &LoanApplication) -> Result<()> {
        self.calls.push(application.id);

        if self.fail {
            return Err(LoanError::ExternalService {
                message: format!("upstream returned an error for {}", application.id),
            });
        }

        Ok(())
    }
}

/// external service that accepts every call and does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExternalService;

impl ExternalService for NoopExternalService {
    fn call(&mut self, _application: &LoanApplication) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use chrono::Utc;

    fn application() -> LoanApplication {
        LoanApplication::new("Mary", Money::from_major(1200), 12, Rate::from_percentage(10), Utc::now())
    }

    #[test]
    fn test_store_save_and_find() {
        let mut store = InMemoryLoanStore::new();
        let app = application();

        store.save(&app).unwrap();
        store.save(&app).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(app.id), Some(app));
    }

    #[test]
    fn test_store_delete_all() {
        let mut store = InMemoryLoanStore::new();
        store.save(&application()).unwrap();
        store.save(&application()).unwrap();

        store.delete_all().unwrap();

        assert!(store.is_empty());
        assert_eq!(store.delete_all_count(), 1);
    }

    #[test]
    fn test_failing_store() {
        let mut store = InMemoryLoanStore::failing();
        let err = store.save(&application()).unwrap_err();

        assert!(matches!(err, LoanError::Store { .. }));
        assert_eq!(store.save_count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_log_notifier_needs_repayment() {
        let mut notifier = LogNotifier;
        let mut app = application();

        assert!(notifier.notify(&app).is_err());

        app.set_repayment(Money::from_major(110), Utc::now());
        assert!(notifier.notify(&app).is_ok());
    }

    #[test]
    fn test_recording_collaborators() {
        let app = application();

        let mut notifier = RecordingNotifier::new();
        notifier.notify(&app).unwrap();
        assert_eq!(notifier.delivered().len(), 1);

        let mut failing = RecordingNotifier::failing();
        assert!(failing.notify(&app).is_err());
        assert!(failing.delivered().is_empty());

        let mut service = RecordingExternalService::failing();
        assert!(service.call(&app).is_err());
        assert_eq!(service.calls(), &[app.id]);
    }
}
