use serde::{Deserialize, Serialize};

/// Availability slot as typed in the form (`HH:MM`, or empty while editing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

impl Interval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both ends filled in.
    pub fn is_complete(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalField {
    Start,
    End,
}

impl IntervalField {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" | "from" => Some(IntervalField::Start),
            "end" | "to" => Some(IntervalField::End),
            _ => None,
        }
    }
}
