//! Connection bootstrap for the notepad store file.
//!
//! # Responsibility
//! - Open the store file and create the `posts` table when absent.
//! - Emit `db_open` logging events with duration and status.
//!
//! # Invariants
//! - Returned connections always have the `posts` table available.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// One table holds every record kind; columns are the union of the base
/// mapping and each kind's extras. Row identity is the implicit SQLite
/// rowid.
const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS posts (
    type TEXT NOT NULL,
    created_at TEXT NOT NULL,
    text TEXT,
    due_date TEXT,
    url TEXT
);";

/// Opens the store file and guarantees the schema exists.
///
/// # Side effects
/// - Creates the `posts` table on first use.
/// - Emits `db_open` logging events.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Applies the `posts` schema on an already open connection.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_schema(conn)?;
    Ok(())
}
