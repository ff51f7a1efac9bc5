//! Quote store schema steps, tracked through `PRAGMA user_version`.
//!
//! # Invariants
//! - Steps are listed in strictly increasing version order.
//! - A database is either fully on a step or not on it at all: all pending
//!   steps share one transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "quotes_table",
    sql: include_str!("0001_init.sql"),
}];

/// Where a connection's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Current,
    /// Older schema; `from` is the recorded version.
    Behind { from: u32 },
    /// Written by a newer build; never touched.
    Ahead { found: u32 },
}

/// Schema version the quote store expects.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

pub fn schema_status(conn: &Connection) -> DbResult<SchemaStatus> {
    let found = current_user_version(conn)?;
    let latest = latest_version();
    Ok(match found.cmp(&latest) {
        std::cmp::Ordering::Equal => SchemaStatus::Current,
        std::cmp::Ordering::Less => SchemaStatus::Behind { from: found },
        std::cmp::Ordering::Greater => SchemaStatus::Ahead { found },
    })
}

/// Fails unless the connection is already on the latest schema.
pub fn require_current(conn: &Connection) -> DbResult<()> {
    match schema_status(conn)? {
        SchemaStatus::Current => Ok(()),
        SchemaStatus::Behind { from: found } | SchemaStatus::Ahead { found } => {
            Err(DbError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version: found,
            })
        }
    }
}

/// Brings the connection up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file comes from a newer build.
/// - `Sqlite` when a step fails; nothing from this call is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = match schema_status(conn)? {
        SchemaStatus::Current => return Ok(()),
        SchemaStatus::Ahead { found } => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: found,
                latest_supported: latest_version(),
            });
        }
        SchemaStatus::Behind { from } => from,
    };

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        apply_migrations, latest_version, require_current, schema_status, SchemaStatus,
        SCHEMA_STEPS,
    };
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn steps_are_strictly_increasing() {
        assert!(SCHEMA_STEPS
            .windows(2)
            .all(|pair| pair[0].version < pair[1].version));
        assert_eq!(latest_version(), 1);
    }

    #[test]
    fn fresh_connection_is_behind_until_migrated() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(
            schema_status(&conn).unwrap(),
            SchemaStatus::Behind { from: 0 }
        );
        assert!(matches!(
            require_current(&conn),
            Err(DbError::UninitializedConnection {
                expected_version: 1,
                actual_version: 0,
            })
        ));

        apply_migrations(&mut conn).unwrap();
        assert_eq!(schema_status(&conn).unwrap(), SchemaStatus::Current);
        require_current(&conn).unwrap();
    }

    #[test]
    fn newer_schema_is_left_untouched() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", 7).unwrap();

        assert!(matches!(
            apply_migrations(&mut conn),
            Err(DbError::UnsupportedSchemaVersion {
                db_version: 7,
                latest_supported: 1,
            })
        ));
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'quotes';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }
}
