use crate::errors::{AppError, AppResult};
use crate::models::interval::{Interval, IntervalField};

/// Maximum number of availability slots one person can enter.
pub const MAX_INTERVALS: usize = 5;

/// Editable list of availability slots.
///
/// Starts with one empty row. Rows are only ever added (up to
/// [`MAX_INTERVALS`]) or edited in place; incomplete rows are dropped by
/// [`IntervalListEditor::to_persistable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalListEditor {
    entries: Vec<Interval>,
}

impl Default for IntervalListEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalListEditor {
    pub fn new() -> Self {
        Self {
            entries: vec![Interval::default()],
        }
    }

    pub fn entries(&self) -> &[Interval] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_INTERVALS
    }

    /// Add an empty row. No-op once the list is full.
    pub fn append(&mut self) -> &[Interval] {
        if !self.is_full() {
            self.entries.push(Interval::default());
        }
        &self.entries
    }

    pub fn set_field(
        &mut self,
        index: usize,
        field: IntervalField,
        value: impl Into<String>,
    ) -> AppResult<&[Interval]> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(AppError::InvalidInterval(index))?;

        match field {
            IntervalField::Start => entry.start = value.into(),
            IntervalField::End => entry.end = value.into(),
        }

        Ok(&self.entries)
    }

    /// Complete rows only, in entry order. No ordering or overlap checks.
    pub fn to_persistable(&self) -> Vec<Interval> {
        self.entries
            .iter()
            .filter(|i| i.is_complete())
            .cloned()
            .collect()
    }

    pub fn reset(&mut self) {
        self.entries = vec![Interval::default()];
    }
}
