use super::{ResponseStore, StoreError};
use crate::models::response::Response;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One recorded call against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Query(NaiveDate),
    Upsert(Response),
}

/// In-process store with a call journal and failure switches.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Response>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Response>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Response> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: StoreCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn query(&self, day: NaiveDate) -> Result<Vec<Response>, StoreError> {
        self.record(StoreCall::Query(day));
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated read failure".into()));
        }
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(rows.iter().filter(|r| r.day == day).cloned().collect())
    }

    async fn upsert(&self, response: &Response) -> Result<(), StoreError> {
        self.record(StoreCall::Upsert(response.clone()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        match rows.iter_mut().find(|r| r.same_key(response)) {
            Some(existing) => *existing = response.clone(),
            None => rows.push(response.clone()),
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
