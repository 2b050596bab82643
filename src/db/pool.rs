//! SQLite connection wrapper (lightweight for CLI usage).

use crate::config::ensure_parent;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Open (creating the parent directory if needed) and make sure the
    /// schema exists.
    pub fn open_initialized(path: &str) -> AppResult<Self> {
        ensure_parent(path)?;
        let pool = Self::new(path)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }
}
