//! SQLite-backed watch store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{ClaimOutcome, Keyword, SeenResult, StoreError, StoreStats, WatchStore};
use crate::provider::CandidateResult;

/// SQLite-backed watch store.
pub struct SqliteWatchStore {
    conn: Mutex<Connection>,
}

impl SqliteWatchStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA foreign_keys=ON;

            -- Registered search keywords (one row per unique term)
            CREATE TABLE IF NOT EXISTS keywords (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT UNIQUE NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Results already delivered, deduplicated per keyword
            CREATE TABLE IF NOT EXISTS seen_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kw_term TEXT NOT NULL,
                fingerprint TEXT NOT NULL,
                title TEXT,
                url TEXT,
                authors TEXT,
                year TEXT,
                first_seen TEXT NOT NULL,
                UNIQUE(kw_term, fingerprint)
            );

            CREATE INDEX IF NOT EXISTS idx_seen_kw_first ON seen_results(kw_term, first_seen DESC);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Convert a row to SeenResult.
    fn row_to_seen_result(row: &rusqlite::Row) -> rusqlite::Result<SeenResult> {
        let first_seen_str: String = row.get(6)?;
        let first_seen = DateTime::parse_from_rfc3339(&first_seen_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(SeenResult {
            kw_term: row.get(0)?,
            fingerprint: row.get(1)?,
            title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            url: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            authors: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            year: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            first_seen,
        })
    }
}

impl WatchStore for SqliteWatchStore {
    fn add_keyword(&self, term: &str) -> Result<Keyword, StoreError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(StoreError::InvalidTerm("term is empty".to_string()));
        }

        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        match conn.execute(
            "INSERT INTO keywords (term, created_at) VALUES (?, ?)",
            params![term, now.to_rfc3339()],
        ) {
            Ok(_) => Ok(Keyword {
                term: term.to_string(),
                created_at: now,
            }),
            // Duplicate registration is a no-op; hand back the stored row.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let created_at_str: String = conn
                    .query_row(
                        "SELECT created_at FROM keywords WHERE term = ?",
                        params![term],
                        |row| row.get(0),
                    )
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or(now);
                Ok(Keyword {
                    term: term.to_string(),
                    created_at,
                })
            }
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn remove_keyword(&self, term: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn
            .execute("DELETE FROM keywords WHERE term = ?", params![term])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(term.to_string()));
        }

        // Cascade: drop the keyword's dedup history so a re-added keyword
        // reports previously seen items as new again.
        conn.execute("DELETE FROM seen_results WHERE kw_term = ?", params![term])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT term, created_at FROM keywords ORDER BY term ASC")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                let created_at_str: String = row.get(1)?;
                let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now());
                Ok(Keyword {
                    term: row.get(0)?,
                    created_at,
                })
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut keywords = Vec::new();
        for row in rows {
            keywords.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(keywords)
    }

    fn claim(
        &self,
        term: &str,
        fingerprint: &str,
        candidate: &CandidateResult,
    ) -> Result<ClaimOutcome, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        match conn.execute(
            "INSERT INTO seen_results (kw_term, fingerprint, title, url, authors, year, first_seen)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                term,
                fingerprint,
                &candidate.title,
                &candidate.url,
                &candidate.authors,
                &candidate.year,
                now.to_rfc3339(),
            ],
        ) {
            Ok(_) => Ok(ClaimOutcome::Claimed),
            // The uniqueness constraint resolves claim conflicts: the loser
            // sees AlreadySeen.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(ClaimOutcome::AlreadySeen)
            }
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn release(&self, term: &str, fingerprint: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "DELETE FROM seen_results WHERE kw_term = ? AND fingerprint = ?",
            params![term, fingerprint],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn recent(&self, term: Option<&str>, limit: u32) -> Result<Vec<SeenResult>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut results = Vec::new();
        match term {
            Some(term) => {
                let mut stmt = conn
                    .prepare(
                        "SELECT kw_term, fingerprint, title, url, authors, year, first_seen
                         FROM seen_results
                         WHERE kw_term = ?
                         ORDER BY first_seen DESC
                         LIMIT ?",
                    )
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let rows = stmt
                    .query_map(params![term, limit], Self::row_to_seen_result)
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                for row in rows {
                    results.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
                }
            }
            None => {
                let mut stmt = conn
                    .prepare(
                        "SELECT kw_term, fingerprint, title, url, authors, year, first_seen
                         FROM seen_results
                         ORDER BY first_seen DESC
                         LIMIT ?",
                    )
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                let rows = stmt
                    .query_map(params![limit], Self::row_to_seen_result)
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                for row in rows {
                    results.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
                }
            }
        }

        Ok(results)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let conn = self.conn.lock().unwrap();

        let keywords: u64 = conn
            .query_row("SELECT COUNT(*) FROM keywords", [], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let seen_results: u64 = conn
            .query_row("SELECT COUNT(*) FROM seen_results", [], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(StoreStats {
            keywords,
            seen_results,
        })
    }
}
