use crate::config::Config;
use crate::core::clock::{CalendarClock, FixedClock, ZonedClock};
use crate::core::gate::AccessGate;
use crate::core::workflow::SubmissionWorkflow;
use crate::errors::{AppError, AppResult};
use crate::store::build_store;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

pub struct Core;

impl Core {
    /// Clock for this run: pinned to `today` when given, otherwise the wall
    /// clock in the configured timezone.
    pub fn clock(cfg: &Config, today: Option<&str>) -> AppResult<Arc<dyn CalendarClock>> {
        match today {
            Some(raw) => {
                let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(raw.to_string()))?;
                Ok(Arc::new(FixedClock::new(day)))
            }
            None => Ok(Arc::new(ZonedClock::new(cfg.tz()?))),
        }
    }

    /// Wire gate, clock and store from configuration.
    pub fn workflow(cfg: &Config, today: Option<&str>) -> AppResult<SubmissionWorkflow> {
        let clock = Self::clock(cfg, today)?;
        let store = build_store(cfg)?;
        Ok(SubmissionWorkflow::new(
            AccessGate::new(cfg.pin.clone()),
            clock,
            store,
        ))
    }

    /// How long a short-lived command waits for a background write.
    pub fn sync_wait(cfg: &Config) -> Duration {
        Duration::from_secs(cfg.remote.timeout_secs.saturating_add(1))
    }
}
