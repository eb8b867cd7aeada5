//! Usage-counter repository
//!
//! A small key-value table holds the command counters plus a
//! last-active-date marker. `commands_today` resets whenever the stored
//! date differs from the current one, checked both at load and on every
//! write so a long-running process rolls over at midnight.

use chrono::NaiveDate;

use super::DbPool;
use crate::handlers::Outcome;
use crate::{Error, Result};

const KEY_TODAY: &str = "commands_today";
const KEY_TOTAL: &str = "total_commands";
const KEY_SUCCESSFUL: &str = "successful_commands";
const KEY_FAILED: &str = "failed_commands";
const KEY_LAST_DATE: &str = "last_active_date";

/// Usage counters, one row per key in the stats table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub commands_today: u64,
    pub total_commands: u64,
    pub successful_commands: u64,
    pub failed_commands: u64,
}

impl SessionStats {
    /// Success percentage, rounded; 100 when nothing has been counted yet
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn success_rate(&self) -> u32 {
        let total = self.successful_commands + self.failed_commands;
        if total == 0 {
            return 100;
        }
        (self.successful_commands as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Stats repository
#[derive(Clone)]
pub struct StatsRepo {
    pool: DbPool,
}

impl StatsRepo {
    /// Create a new stats repository
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Load counters, applying the daily reset for the current date
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn load(&self) -> Result<SessionStats> {
        self.load_on(today())
    }

    /// Load counters as of a given date (exposed for day-boundary tests)
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn load_on(&self, date: NaiveDate) -> Result<SessionStats> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stats = SessionStats {
            commands_today: read_counter(&conn, KEY_TODAY)?,
            total_commands: read_counter(&conn, KEY_TOTAL)?,
            successful_commands: read_counter(&conn, KEY_SUCCESSFUL)?,
            failed_commands: read_counter(&conn, KEY_FAILED)?,
        };

        if roll_date(&conn, date)? {
            stats.commands_today = 0;
        }

        Ok(stats)
    }

    /// Record one dispatched command and persist all counters
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn record(&self, outcome: Outcome) -> Result<SessionStats> {
        self.record_on(outcome, today())
    }

    /// Record a command as of a given date (exposed for day-boundary tests)
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn record_on(&self, outcome: Outcome, date: NaiveDate) -> Result<SessionStats> {
        let mut stats = self.load_on(date)?;

        stats.commands_today += 1;
        stats.total_commands += 1;
        match outcome {
            Outcome::Success => stats.successful_commands += 1,
            Outcome::Failure => stats.failed_commands += 1,
        }

        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        write_counter(&conn, KEY_TODAY, stats.commands_today)?;
        write_counter(&conn, KEY_TOTAL, stats.total_commands)?;
        write_counter(&conn, KEY_SUCCESSFUL, stats.successful_commands)?;
        write_counter(&conn, KEY_FAILED, stats.failed_commands)?;

        Ok(stats)
    }

    /// Count a recognition failure
    ///
    /// Recognition errors are not dispatched commands: only the failed
    /// counter moves, so they drag the success rate down without
    /// inflating the command totals.
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn record_recognition_failure(&self) -> Result<SessionStats> {
        let mut stats = self.load()?;
        stats.failed_commands += 1;

        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        write_counter(&conn, KEY_FAILED, stats.failed_commands)?;

        Ok(stats)
    }

}

/// Compare the stored date marker with `date`, updating the marker
///
/// Returns true when the day changed and `commands_today` must reset.
fn roll_date(conn: &super::DbConn, date: NaiveDate) -> Result<bool> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM stats WHERE key = ?1",
            [KEY_LAST_DATE],
            |row| row.get(0),
        )
        .ok();

    let current = date.to_string();
    if stored.as_deref() == Some(current.as_str()) {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO stats (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [KEY_LAST_DATE, current.as_str()],
    )?;
    write_counter(conn, KEY_TODAY, 0)?;

    // A missing marker is first use, not a day change
    Ok(stored.is_some())
}

fn read_counter(conn: &super::DbConn, key: &str) -> Result<u64> {
    let value: Option<String> = conn
        .query_row("SELECT value FROM stats WHERE key = ?1", [key], |row| row.get(0))
        .ok();

    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
}

fn write_counter(conn: &super::DbConn, key: &str, value: u64) -> Result<()> {
    conn.execute(
        "INSERT INTO stats (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value.to_string().as_str()],
    )?;
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
