//! Submission workflow: the form's state machine.
//!
//! ```text
//! Unauthenticated --confirm_pin / submit ok--> Authenticated
//! Authenticated --submit ok--> (local commit, remote sync spawned, form reset) --> Authenticated
//! ```
//!
//! Submitting is two-phase. The response is committed to the local list
//! first; the store upsert then runs in a spawned task whose result is only
//! logged. A failed or slow store never rolls back the local list and never
//! reaches the form's error field.

use crate::core::aggregate::{Board, ResponseAggregator};
use crate::core::clock::CalendarClock;
use crate::core::gate::AccessGate;
use crate::core::intervals::IntervalListEditor;
use crate::errors::{AppError, AppResult};
use crate::models::answer::Answer;
use crate::models::interval::IntervalField;
use crate::models::response::Response;
use crate::store::{SharedStore, StoreError};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Editable part of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub pin: String,
    pub answer: Option<Answer>,
    pub intervals: IntervalListEditor,
    pub error: String,
}

impl FormState {
    pub fn reset(&mut self) {
        self.name.clear();
        self.pin.clear();
        self.answer = None;
        self.intervals.reset();
        self.error.clear();
    }
}

/// How the background write ended, as seen by a caller that chose to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No store configured.
    LocalOnly,
    Persisted,
    Failed(String),
    TimedOut,
}

/// Result of a successful submit: the committed response plus a handle on
/// the background store write.
#[derive(Debug)]
pub struct SubmitReceipt {
    pub response: Response,
    sync: Option<JoinHandle<Result<(), StoreError>>>,
}

impl SubmitReceipt {
    pub fn is_local_only(&self) -> bool {
        self.sync.is_none()
    }

    /// Wait (at most `limit`) for the background write.
    ///
    /// The workflow never calls this. It exists for short-lived callers
    /// that would otherwise exit before the write is sent.
    pub async fn settle(self, limit: Duration) -> SyncOutcome {
        let Some(handle) = self.sync else {
            return SyncOutcome::LocalOnly;
        };

        match tokio::time::timeout(limit, handle).await {
            Ok(Ok(Ok(()))) => SyncOutcome::Persisted,
            Ok(Ok(Err(e))) => SyncOutcome::Failed(e.to_string()),
            Ok(Err(join)) => SyncOutcome::Failed(join.to_string()),
            Err(_) => SyncOutcome::TimedOut,
        }
    }
}

pub struct SubmissionWorkflow {
    gate: AccessGate,
    clock: Arc<dyn CalendarClock>,
    store: Option<SharedStore>,
    form: FormState,
    authorized: bool,
    responses: Vec<Response>,
    loaded_day: Option<NaiveDate>,
}

impl SubmissionWorkflow {
    /// `store = None` runs local-only: nothing is read or written remotely.
    pub fn new(gate: AccessGate, clock: Arc<dyn CalendarClock>, store: Option<SharedStore>) -> Self {
        Self {
            gate,
            clock,
            store,
            form: FormState::default(),
            authorized: false,
            responses: Vec::new(),
            loaded_day: None,
        }
    }

    // ------------------------------------------------
    // Read side
    // ------------------------------------------------

    /// Fetch today's responses once. A failed read leaves the list empty.
    pub async fn load(&mut self) -> &[Response] {
        let day = self.clock.today();
        self.loaded_day = Some(day);

        self.responses = match &self.store {
            None => Vec::new(),
            Some(store) => match store.query(day).await {
                Ok(rows) => {
                    debug!("Loaded {} responses for {}", rows.len(), day);
                    rows
                }
                Err(e) => {
                    warn!("Could not load responses for {} from {}: {}", day, store.describe(), e);
                    Vec::new()
                }
            },
        };

        &self.responses
    }

    pub fn loaded_day(&self) -> Option<NaiveDate> {
        self.loaded_day
    }

    /// Day the board belongs to: the loaded day, or today on the
    /// workflow's clock before any load.
    pub fn board_day(&self) -> NaiveDate {
        self.loaded_day.unwrap_or_else(|| self.clock.today())
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn board(&self) -> Board<'_> {
        ResponseAggregator::partition(&self.responses)
    }

    // ------------------------------------------------
    // Form editing
    // ------------------------------------------------

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn error(&self) -> &str {
        &self.form.error
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_pin(&mut self, pin: impl Into<String>) {
        self.form.pin = pin.into();
    }

    pub fn choose_answer(&mut self, answer: Option<Answer>) {
        self.form.answer = answer;
    }

    /// Returns false when the list is already full.
    pub fn add_interval(&mut self) -> bool {
        let before = self.form.intervals.len();
        self.form.intervals.append().len() > before
    }

    pub fn set_interval(
        &mut self,
        index: usize,
        field: IntervalField,
        value: impl Into<String>,
    ) -> AppResult<()> {
        self.form.intervals.set_field(index, field, value)?;
        Ok(())
    }

    // ------------------------------------------------
    // Transitions
    // ------------------------------------------------

    /// Explicit "confirm PIN". Only the PIN is checked here; the name is
    /// required at submit time.
    pub fn confirm_pin(&mut self) -> AppResult<()> {
        let result = if self.form.pin.is_empty() {
            Err(AppError::MissingCredentials)
        } else if !self.gate.verify(&self.form.pin) {
            Err(AppError::InvalidSecret)
        } else {
            Ok(())
        };

        self.settle_validation(result)
    }

    /// Validate, commit locally, start the store write, reset the form.
    ///
    /// The PIN is re-checked on every submit, even after a successful
    /// confirm. An unset answer is accepted and stored as `null`.
    pub fn submit(&mut self) -> AppResult<SubmitReceipt> {
        let result = if self.form.name.is_empty() || self.form.pin.is_empty() {
            Err(AppError::MissingCredentials)
        } else if !self.gate.verify(&self.form.pin) {
            Err(AppError::InvalidSecret)
        } else {
            Ok(())
        };
        self.settle_validation(result)?;

        if self.form.answer.is_none() {
            debug!("Submitting '{}' with no answer chosen", self.form.name);
        }

        let response = Response::new(
            self.clock.today(),
            self.form.name.clone(),
            self.form.answer,
            self.form.intervals.to_persistable(),
            self.clock.now(),
        );

        // Phase 1: local commit.
        self.responses.push(response.clone());

        // Phase 2: best-effort remote sync.
        let sync = self.spawn_upsert(&response);

        self.form.reset();

        Ok(SubmitReceipt { response, sync })
    }

    fn settle_validation(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => {
                self.authorized = true;
                self.form.error.clear();
                Ok(())
            }
            Err(e) => {
                self.form.error = e.to_string();
                Err(e)
            }
        }
    }

    fn spawn_upsert(&self, response: &Response) -> Option<JoinHandle<Result<(), StoreError>>> {
        let store = Arc::clone(self.store.as_ref()?);

        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available, '{}' kept locally only", response.name);
            return None;
        };

        let response = response.clone();
        Some(handle.spawn(async move {
            let result = store.upsert(&response).await;
            match &result {
                Ok(()) => debug!("Stored response of '{}' for {}", response.name, response.day),
                Err(e) => warn!(
                    "Could not store response of '{}' for {} in {}: {}",
                    response.name,
                    response.day,
                    store.describe(),
                    e
                ),
            }
            result
        }))
    }
}
