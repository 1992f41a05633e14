//! Bootstrap of the `employees` table.
//!
//! # Responsibility
//! - Create the table the repository expects on a fresh database.
//! - Refuse databases stamped by a newer build.
//!
//! # Invariants
//! - The created schema is stamped into `PRAGMA user_version`.
//! - There is exactly one schema version; existing tables are never altered.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const EMPLOYEES_SQL: &str = include_str!("sql/employees.sql");

/// Creates the schema on the provided connection unless already present.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database was stamped by a newer build.
/// - `Sqlite` when table creation fails.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(EMPLOYEES_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
