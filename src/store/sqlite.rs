//! Local SQLite backend.
//!
//! Same `responses` shape as the hosted table; `UNIQUE(day, name)` plus
//! `ON CONFLICT ... DO UPDATE` gives the upsert.

use super::{ResponseStore, StoreError};
use crate::db::initialize::init_db;
use crate::models::answer::Answer;
use crate::models::interval::Interval;
use crate::models::response::Response;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};
use std::sync::{Arc, Mutex};

pub struct SqliteStore {
    path: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        crate::config::ensure_parent(path)
            .map_err(|e| StoreError::Unavailable(format!("{path}: {e}")))?;
        let conn = Connection::open(path)?;
        init_db(&conn)?;
        Ok(Self {
            path: path.to_string(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on tokio's blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("sqlite connection poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("sqlite task failed: {e}")))?
    }
}

fn row_to_response(row: &rusqlite::Row) -> rusqlite::Result<(Response, String)> {
    let day: String = row.get("day")?;
    let answer: Option<String> = row.get("answer")?;
    let intervals: String = row.get("intervals")?;
    let inserted_at: String = row.get("inserted_at")?;

    let day = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let inserted_at = DateTime::parse_from_rfc3339(&inserted_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let response = Response {
        day,
        name: row.get("name")?,
        answer: answer.as_deref().and_then(Answer::from_db_str),
        intervals: Vec::new(),
        inserted_at,
    };

    Ok((response, intervals))
}

#[async_trait]
impl ResponseStore for SqliteStore {
    async fn query(&self, day: NaiveDate) -> Result<Vec<Response>, StoreError> {
        let day = day.format("%Y-%m-%d").to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT day, name, answer, intervals, inserted_at
                 FROM responses WHERE day = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([day], row_to_response)?;

            let mut out = Vec::new();
            for r in rows {
                let (mut response, intervals) = r?;
                response.intervals = serde_json::from_str::<Vec<Interval>>(&intervals)?;
                out.push(response);
            }
            Ok(out)
        })
        .await
    }

    async fn upsert(&self, response: &Response) -> Result<(), StoreError> {
        let intervals = serde_json::to_string(&response.intervals)?;
        let response = response.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO responses (day, name, answer, intervals, inserted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(day, name) DO UPDATE SET
                    answer = excluded.answer,
                    intervals = excluded.intervals,
                    inserted_at = excluded.inserted_at",
                params![
                    response.day_str(),
                    response.name,
                    response.answer.map(|a| a.to_db_str()),
                    intervals,
                    response.inserted_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    fn describe(&self) -> String {
        format!("sqlite {}", self.path)
    }
}
