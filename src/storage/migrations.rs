use crate::shared::errors::StorageError;
use rusqlite::Connection;

/// Version written to `PRAGMA user_version` once the table exists.
pub const SCHEMA_VERSION: i64 = 1;

pub const TABLE_NAME: &str = "TODO_TABLE";

/// Bring the database to `SCHEMA_VERSION`.
///
/// A fresh file (version 0) gets the table created. An older version is
/// upgraded destructively: the table is dropped and recreated, discarding
/// every stored task. Files written by a newer schema are refused.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    migrate_to(conn, current, SCHEMA_VERSION)
}

pub(crate) fn migrate_to(conn: &Connection, current: i64, target: i64) -> Result<(), StorageError> {
    if current == target {
        return Ok(());
    }

    if current > target {
        return Err(StorageError::UnsupportedVersion {
            found: current,
            supported: target,
        });
    }

    let tx = conn.unchecked_transaction()?;

    if current == 0 {
        create_schema(&tx)?;
        tracing::info!(target: "tasks::storage", version = target, "Created task table");
    } else {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {TABLE_NAME};"))?;
        create_schema(&tx)?;
        tracing::warn!(
            target: "tasks::storage",
            from = current,
            to = target,
            "Schema upgraded by recreating the task table; existing tasks were discarded"
        );
    }

    tx.pragma_update(None, "user_version", target)?;
    tx.commit()?;
    Ok(())
}

fn create_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            TASK TEXT,
            STATUS INTEGER
        );"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_version(conn: &Connection) -> i64 {
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_fresh_database_gets_table_and_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(user_version(&conn), SCHEMA_VERSION);
        assert_eq!(row_count(&conn), 0);

        let columns: Vec<String> = conn
            .prepare(&format!("PRAGMA table_info({TABLE_NAME})"))
            .unwrap()
            .query_map([], |row| row.get(1))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(columns, vec!["ID", "TASK", "STATUS"]);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            &format!("INSERT INTO {TABLE_NAME} (TASK, STATUS) VALUES ('keep me', 0)"),
            [],
        )
        .unwrap();

        run_migrations(&conn).unwrap();
        assert_eq!(row_count(&conn), 1);
    }

    #[test]
    fn test_upgrade_drops_existing_tasks() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            &format!("INSERT INTO {TABLE_NAME} (TASK, STATUS) VALUES ('old', 1)"),
            [],
        )
        .unwrap();

        migrate_to(&conn, SCHEMA_VERSION, SCHEMA_VERSION + 1).unwrap();

        assert_eq!(user_version(&conn), SCHEMA_VERSION + 1);
        assert_eq!(row_count(&conn), 0);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 4)
            .unwrap();

        let err = run_migrations(&conn).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedVersion { found: 5, supported: 1 }
        ));
    }
}
