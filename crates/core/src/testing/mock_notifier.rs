//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::notifier::{Notifier, NotifyError};
use crate::provider::CandidateResult;

/// A successfully delivered notification, recorded for assertions.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The keyword the result matched.
    pub keyword: String,
    /// The delivered result.
    pub result: CandidateResult,
}

/// Mock implementation of the Notifier trait.
///
/// Records successful deliveries and can be told to fail the next delivery
/// or every delivery. Failed attempts are counted but not recorded as
/// deliveries.
pub struct MockNotifier {
    deliveries: Mutex<Vec<Delivery>>,
    fail_next: Mutex<bool>,
    fail_always: Mutex<bool>,
    attempts: Mutex<usize>,
}

impl std::fmt::Debug for MockNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockNotifier").finish_non_exhaustive()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    /// Create a new mock notifier that accepts every delivery.
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_next: Mutex::new(false),
            fail_always: Mutex::new(false),
            attempts: Mutex::new(0),
        }
    }

    /// Fail the next delivery attempt, then recover.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Fail every delivery attempt until `recover` is called.
    pub fn fail_always(&self) {
        *self.fail_always.lock().unwrap() = true;
    }

    /// Stop failing deliveries.
    pub fn recover(&self) {
        *self.fail_always.lock().unwrap() = false;
        *self.fail_next.lock().unwrap() = false;
    }

    /// Successfully delivered notifications, in delivery order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Total delivery attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, keyword: &str, result: &CandidateResult) -> Result<(), NotifyError> {
        *self.attempts.lock().unwrap() += 1;

        if *self.fail_always.lock().unwrap() {
            return Err(NotifyError::Status(500));
        }
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            return Err(NotifyError::Status(500));
        }

        self.deliveries.lock().unwrap().push(Delivery {
            keyword: keyword.to_string(),
            result: result.clone(),
        });
        Ok(())
    }
}
