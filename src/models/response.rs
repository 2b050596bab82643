use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::answer::Answer;
use super::interval::Interval;

/// One person's answer for one day.
///
/// Serialized field names match the `responses` table columns, so the same
/// struct travels to the REST store and back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub day: NaiveDate, // ⇔ responses.day (TEXT "YYYY-MM-DD")
    pub name: String,   // ⇔ responses.name, (day, name) is unique
    #[serde(default, deserialize_with = "answer_or_unset")]
    pub answer: Option<Answer>, // ⇔ responses.answer ('yes' | 'no' | NULL)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub intervals: Vec<Interval>, // ⇔ responses.intervals (JSON array or NULL)
    pub inserted_at: DateTime<Utc>, // ⇔ responses.inserted_at (ISO8601)
}

impl Response {
    pub fn new(
        day: NaiveDate,
        name: impl Into<String>,
        answer: Option<Answer>,
        intervals: Vec<Interval>,
        inserted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            day,
            name: name.into(),
            answer,
            intervals,
            inserted_at,
        }
    }

    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }

    /// True when `other` targets the same `(day, name)` row.
    pub fn same_key(&self, other: &Response) -> bool {
        self.day == other.day && self.name == other.name
    }

    pub fn is_yes(&self) -> bool {
        self.answer == Some(Answer::Yes)
    }

    pub fn is_no(&self) -> bool {
        self.answer == Some(Answer::No)
    }
}

/// Any answer other than `yes`/`no` reads as unset, so the row is kept but
/// shows in neither group.
fn answer_or_unset<'de, D>(deserializer: D) -> Result<Option<Answer>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Answer::from_db_str))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Interval>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Interval>>::deserialize(deserializer)?.unwrap_or_default())
}
