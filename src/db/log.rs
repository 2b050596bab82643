use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;
use tracing::warn;

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Best-effort audit line: opens the local database, writes one row, and
/// only warns when anything goes wrong.
pub fn audit(database: &str, operation: &str, target: &str, message: &str) {
    let result =
        DbPool::open_initialized(database).and_then(|pool| ttlog(&pool.conn, operation, target, message));

    if let Err(e) = result {
        warn!("Failed to write internal log: {e}");
    }
}
