#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, TimeZone, Utc};
use rlunchpoll::core::clock::FixedClock;
use rlunchpoll::core::gate::AccessGate;
use rlunchpoll::core::workflow::SubmissionWorkflow;
use rlunchpoll::models::answer::Answer;
use rlunchpoll::models::interval::Interval;
use rlunchpoll::models::response::Response;
use rlunchpoll::store::SharedStore;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const PIN: &str = "110925";
pub const TODAY: &str = "2025-10-17";
pub const WAIT: Duration = Duration::from_secs(5);

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 17).expect("valid date")
}

pub fn yesterday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 16).expect("valid date")
}

pub fn response(name: &str, answer: Option<Answer>, intervals: Vec<Interval>) -> Response {
    Response::new(
        today(),
        name,
        answer,
        intervals,
        Utc.with_ymd_and_hms(2025, 10, 17, 9, 30, 0).unwrap(),
    )
}

pub fn workflow(store: Option<SharedStore>) -> SubmissionWorkflow {
    SubmissionWorkflow::new(
        AccessGate::new(PIN),
        Arc::new(FixedClock::new(today())),
        store,
    )
}

/// Binary with a private HOME so no real config file or env leaks in.
pub fn rlp(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rlunchpoll");
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RLUNCHPOLL_REMOTE_URL")
        .env_remove("RLUNCHPOLL_REMOTE_KEY")
        .env_remove("RLUNCHPOLL_PIN")
        .env_remove("RUST_LOG");
    cmd
}

pub fn db_path(home: &Path) -> String {
    home.join("poll.sqlite").to_string_lossy().to_string()
}
