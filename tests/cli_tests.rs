use httpmock::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::{Value, json};
use tempfile::tempdir;

mod common;
use common::{PIN, TODAY, db_path, rlp};

#[test]
fn test_init_creates_database() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    rlp(home.path())
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db).exists());
}

#[test]
fn test_config_print_masks_secrets() {
    let home = tempdir().unwrap();

    rlp(home.path())
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("Europe/Ljubljana"))
        .stdout(contains("******"))
        .stdout(contains(PIN).not());
}

#[test]
fn test_submit_with_wrong_pin_fails() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", "0000", "--answer", "yes"])
        .assert()
        .failure()
        .stderr(contains("wrong PIN"));
}

#[test]
fn test_submit_with_empty_name_fails() {
    let home = tempdir().unwrap();

    rlp(home.path())
        .args(["--store", "none", "--today", TODAY])
        .args(["submit", "--name", "", "--pin", PIN, "--answer", "no"])
        .assert()
        .failure()
        .stderr(contains("enter name and PIN"));
}

#[test]
fn test_resubmit_keeps_one_record_per_person() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "yes"])
        .args(["-i", "11:30-12:30", "-i", "13:00-13:45"])
        .assert()
        .success()
        .stdout(contains("Answer saved for Ana on 2025-10-17."));

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "no"])
        .assert()
        .success();

    let out = rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["list", "--pin", PIN, "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let board: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(board["day"], "2025-10-17");
    assert_eq!(board["yes"].as_array().unwrap().len(), 0);
    assert_eq!(board["no"].as_array().unwrap().len(), 1);
    assert_eq!(board["no"][0]["name"], "Ana");
}

#[test]
fn test_board_shows_slots_of_yes_answers() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["submit", "--name", "Bor", "--pin", PIN, "--answer", "yes"])
        .args(["-i", "9:05-10:00"])
        .assert()
        .success();

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["list", "--pin", PIN])
        .assert()
        .success()
        .stdout(contains("YES :) (1)"))
        .stdout(contains("NO :( (0)"))
        .stdout(contains("09:05 - 10:00"));
}

#[test]
fn test_list_with_wrong_pin_fails() {
    let home = tempdir().unwrap();

    rlp(home.path())
        .args(["--store", "none", "list", "--pin", "nope"])
        .assert()
        .failure()
        .stderr(contains("wrong PIN"));
}

#[test]
fn test_extra_intervals_are_ignored_with_warning() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    let mut cmd = rlp(home.path());
    cmd.args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "yes"]);
    for slot in [
        "10:00-10:30",
        "11:00-11:30",
        "12:00-12:30",
        "13:00-13:30",
        "14:00-14:30",
        "15:00-15:30",
    ] {
        cmd.args(["-i", slot]);
    }

    cmd.assert()
        .success()
        .stdout(contains("ignoring 1 extra"))
        .stdout(contains("14:00 - 14:30"))
        .stdout(contains("15:00 - 15:30").not());
}

#[test]
fn test_local_only_submit_says_so() {
    let home = tempdir().unwrap();

    rlp(home.path())
        .args(["--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "yes"])
        .assert()
        .success()
        .stdout(contains("kept for this session only"))
        .stdout(contains("YES :) (1)"));
}

#[test]
fn test_remote_store_via_environment() {
    let server = MockServer::start();
    let read = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/rest/v1/responses")
            .query_param("day", "eq.2025-10-17")
            .header("apikey", "env-key");
        then.status(200).json_body(json!([{
            "day": "2025-10-17",
            "name": "Cene",
            "answer": "no",
            "intervals": [],
            "inserted_at": "2025-10-17T08:00:00Z"
        }]));
    });
    let write = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/rest/v1/responses")
            .query_param("on_conflict", "day,name");
        then.status(201);
    });

    let home = tempdir().unwrap();
    rlp(home.path())
        .env("RLUNCHPOLL_REMOTE_URL", server.base_url())
        .env("RLUNCHPOLL_REMOTE_KEY", "env-key")
        .args(["--db", &db_path(home.path()), "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "yes"])
        .assert()
        .success()
        .stdout(contains("Cene"))
        .stdout(contains("YES :) (1)"))
        .stdout(contains("kept for this session only").not());

    read.assert();
    write.assert();
}

#[test]
fn test_remote_failure_is_logged_not_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path("/rest/v1/responses");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(Method::POST).path("/rest/v1/responses");
        then.status(500).body("boom");
    });

    let home = tempdir().unwrap();
    let db = db_path(home.path());

    rlp(home.path())
        .env("RLUNCHPOLL_REMOTE_URL", server.base_url())
        .env("RLUNCHPOLL_REMOTE_KEY", "env-key")
        .args(["--db", &db, "--today", TODAY])
        .args(["submit", "--name", "Ana", "--pin", PIN, "--answer", "no"])
        .assert()
        .success()
        .stdout(contains("Answer saved for Ana"))
        .stdout(contains("NO :( (1)"));

    rlp(home.path())
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("sync_failed"))
        .stdout(contains("boom"));
}

#[test]
fn test_session_requires_confirmed_pin() {
    let home = tempdir().unwrap();
    let db = db_path(home.path());

    let script = "\
show
name Ana
pin 1234
confirm
pin 110925
confirm
answer yes
set 1 start 11:30
set 1 end 12:30
submit
quit
";

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY, "session"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Confirm the PIN first."))
        .stdout(contains("wrong PIN"))
        .stdout(contains("PIN confirmed."))
        .stdout(contains("Answer saved for Ana."))
        .stdout(contains("11:30 - 12:30"));

    rlp(home.path())
        .args(["--db", &db, "--store", "sqlite", "--today", TODAY])
        .args(["list", "--pin", PIN, "--json"])
        .assert()
        .success()
        .stdout(contains("\"Ana\""))
        .stdout(contains("11:30"));
}

#[test]
fn test_session_rejects_bad_time() {
    let home = tempdir().unwrap();

    rlp(home.path())
        .args(["--store", "none", "--today", TODAY, "session"])
        .write_stdin("pin 110925\nconfirm\nset 1 start 25:99\nset 6 end 10:00\nquit\n")
        .assert()
        .success()
        .stdout(contains("Invalid time format"))
        .stdout(contains("No interval at position 6"));
}
