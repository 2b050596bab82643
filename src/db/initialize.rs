use rusqlite::{Connection, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ensure that the `responses` table exists.
/// `(day, name)` is the upsert conflict target.
fn ensure_responses_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS responses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            day         TEXT NOT NULL,               -- YYYY-MM-DD
            name        TEXT NOT NULL,
            answer      TEXT CHECK (answer IN ('yes','no')),
            intervals   TEXT NOT NULL DEFAULT '[]',  -- JSON [{start,end}]
            inserted_at TEXT NOT NULL,               -- ISO 8601 timestamp
            UNIQUE (day, name)
        );

        CREATE INDEX IF NOT EXISTS idx_responses_day ON responses(day);
        "#,
    )?;
    Ok(())
}

/// Initialize the database schema. Safe to call on every open.
pub fn init_db(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_responses_table(conn)?;
    Ok(())
}
