//! # Remote store
//!
//! Hosted table reached over a PostgREST-style HTTP API (the Supabase REST
//! flavour).
//!
//! ## Requests
//! - Read: `GET {url}/rest/v1/{table}?select=*&day=eq.{day}`
//! - Upsert: `POST {url}/rest/v1/{table}?on_conflict=day,name` with
//!   `Prefer: resolution=merge-duplicates`, body is a one-element JSON array
//! - The access key goes in both `apikey` and `Authorization: Bearer`
//!
//! ## Failure
//! Any non-2xx answer becomes [`StoreError::Status`]; the client timeout
//! becomes [`StoreError::Timeout`]. No retries here. Rows that do not decode
//! are dropped with a warning.

use super::{CONFLICT_KEYS, ResponseStore, StoreError};
use crate::config::RemoteConfig;
use crate::models::response::Response;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, header};
use std::time::Duration;
use tracing::{debug, warn};

pub struct RestStore {
    client: Client,
    base_url: String,
    key: String,
    table: String,
    timeout_secs: u64,
}

impl RestStore {
    pub fn new(
        base_url: &str,
        key: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            table: table.to_string(),
            timeout_secs,
        })
    }

    pub fn from_config(cfg: &RemoteConfig) -> Result<Self, StoreError> {
        Self::new(&cfg.url, &cfg.key, &cfg.table, cfg.timeout_secs)
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
    }

    fn map_err(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout_secs)
        } else {
            StoreError::Http(e)
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode rows one by one; a malformed row is skipped, never the whole day.
fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Response> {
    rows.into_iter()
        .filter_map(|row| {
            let name = row.get("name").cloned().unwrap_or_default();
            match serde_json::from_value::<Response>(row) {
                Ok(response) => Some(response),
                Err(e) => {
                    warn!("Skipping unreadable response row (name {}): {}", name, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ResponseStore for RestStore {
    async fn query(&self, day: NaiveDate) -> Result<Vec<Response>, StoreError> {
        let day_filter = format!("eq.{}", day.format("%Y-%m-%d"));
        debug!("GET {} day={}", self.endpoint(), day_filter);

        let req = self
            .client
            .get(self.endpoint())
            .query(&[("select", "*"), ("day", day_filter.as_str())]);

        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;
        let resp = Self::check(resp).await?;

        let rows = resp
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| self.map_err(e))?;

        Ok(decode_rows(rows))
    }

    async fn upsert(&self, response: &Response) -> Result<(), StoreError> {
        let conflict = CONFLICT_KEYS.join(",");
        debug!(
            "POST {} on_conflict={} name={}",
            self.endpoint(),
            conflict,
            response.name
        );

        let req = self
            .client
            .post(self.endpoint())
            .query(&[("on_conflict", conflict.as_str())])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[response]);

        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;
        Self::check(resp).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote {}", self.endpoint())
    }
}
