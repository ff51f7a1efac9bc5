use quotedb_core::db::migrations::{latest_version, schema_status, SchemaStatus};
use quotedb_core::db::{open_db, open_db_in_memory, DbError};
use quotedb_core::{QuoteRepository, RepoError, SqliteQuoteRepository};
use rusqlite::{params, Connection};

#[test]
fn migrated_store_has_quote_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_status(&conn).unwrap(), SchemaStatus::Current);
    assert_eq!(
        sqlite_objects(&conn),
        vec![
            ("index".to_string(), "idx_quotes_author".to_string()),
            ("table".to_string(), "quotes".to_string()),
            ("table".to_string(), "sqlite_sequence".to_string()),
        ]
    );
}

#[test]
fn schema_rejects_blank_rows_written_behind_the_repository() {
    let conn = open_db_in_memory().unwrap();
    let insert = "INSERT INTO quotes (author, text, created_at) VALUES (?1, ?2, 0);";

    assert!(conn.execute(insert, params!["ann", ""]).is_err());
    assert!(conn.execute(insert, params!["", "hello"]).is_err());
    assert_eq!(conn.execute(insert, params!["ann", "hello"]).unwrap(), 1);
}

#[test]
fn reopened_file_keeps_rows_and_id_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.db");

    let conn = open_db(&path).unwrap();
    conn.execute_batch(
        "INSERT INTO quotes (author, text, created_at) VALUES ('ann', 'one', 0);
         INSERT INTO quotes (author, text, created_at) VALUES ('ann', 'two', 0);
         DELETE FROM quotes WHERE id = 2;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_status(&conn).unwrap(), SchemaStatus::Current);
    let sequence: i64 = conn
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = 'quotes';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(sequence, 2);
    drop(conn);

    let repo = SqliteQuoteRepository::open(&path).unwrap();
    assert_eq!(repo.count_quotes(None).unwrap(), 1);
}

#[test]
fn store_written_by_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", latest_version() + 1)
        .unwrap();
    drop(conn);

    assert!(matches!(
        open_db(&path),
        Err(DbError::UnsupportedSchemaVersion { db_version, .. })
            if db_version == latest_version() + 1
    ));
    assert!(matches!(
        SqliteQuoteRepository::open(&path),
        Err(RepoError::StoreUnavailable(DbError::UnsupportedSchemaVersion { .. }))
    ));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    assert!(matches!(
        SqliteQuoteRepository::try_new(conn),
        Err(RepoError::StoreUnavailable(DbError::UninitializedConnection {
            expected_version: 1,
            actual_version: 0,
        }))
    ));
}

#[test]
fn unreadable_path_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("quotes.db");

    assert!(matches!(
        SqliteQuoteRepository::open(&path),
        Err(RepoError::StoreUnavailable(_))
    ));
}

fn sqlite_objects(conn: &Connection) -> Vec<(String, String)> {
    let mut stmt = conn
        .prepare(
            "SELECT type, name FROM sqlite_master
             WHERE name NOT LIKE 'sqlite_autoindex%'
             ORDER BY type, name;",
        )
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}
