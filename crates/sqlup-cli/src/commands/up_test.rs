use super::*;
use clap::Parser;
use sqlup_core::Dialect;
use sqlup_db::{Database, SqlxBackend};
use std::path::Path;

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

fn cli_for(db_path: &Path, sql_file: &Path, extra: &[&str]) -> Cli {
    let url = sqlite_url(db_path);
    let mut args = vec![
        "sql-up",
        "-d",
        "sqlite3",
        "-c",
        url.as_str(),
        "-f",
        sql_file.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    Cli::try_parse_from(args).unwrap()
}

async fn stored_content(db_path: &Path) -> Option<String> {
    let mut db = SqlxBackend::connect(Dialect::Sqlite3, &sqlite_url(db_path))
        .await
        .unwrap();
    let content = db
        .query_optional_text("SELECT content FROM sql_up")
        .await
        .unwrap();
    db.close().await.unwrap();
    content
}

#[tokio::test]
async fn test_apply_then_append() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("app.db");
    let sql_file = dir.path().join("schema.sql");

    let v1 = "-- sql-up\nCREATE TABLE users(id INTEGER PRIMARY KEY);\n";
    std::fs::write(&sql_file, v1).unwrap();
    execute(&cli_for(&db_path, &sql_file, &[])).await.unwrap();
    assert_eq!(stored_content(&db_path).await.as_deref(), Some(v1));

    // Unchanged file is a no-op
    execute(&cli_for(&db_path, &sql_file, &[])).await.unwrap();

    let v2 = format!("{v1}-- sql-up\nALTER TABLE users ADD COLUMN name TEXT;\n");
    std::fs::write(&sql_file, &v2).unwrap();
    execute(&cli_for(&db_path, &sql_file, &[])).await.unwrap();
    assert_eq!(stored_content(&db_path).await.as_deref(), Some(v2.as_str()));
}

#[tokio::test]
async fn test_edited_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("app.db");
    let sql_file = dir.path().join("schema.sql");

    std::fs::write(&sql_file, "-- sql-up\nCREATE TABLE a(id INT);\n").unwrap();
    execute(&cli_for(&db_path, &sql_file, &[])).await.unwrap();

    std::fs::write(&sql_file, "-- sql-up\nCREATE TABLE b(id INT);\n").unwrap();
    let err = execute(&cli_for(&db_path, &sql_file, &[]))
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("modified in place"), "{message}");
    assert!(message.contains("line 2"), "{message}");
}

#[tokio::test]
async fn test_dry_run_leaves_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("app.db");
    let sql_file = dir.path().join("schema.sql");

    std::fs::write(&sql_file, "-- sql-up\nCREATE TABLE a(id INT);\n").unwrap();
    execute(&cli_for(&db_path, &sql_file, &["--dry-run"]))
        .await
        .unwrap();

    assert_eq!(stored_content(&db_path).await, None);
}

#[tokio::test]
async fn test_missing_sql_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("app.db");
    let sql_file = dir.path().join("missing.sql");

    let err = execute(&cli_for(&db_path, &sql_file, &[]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read SQL file"));
}

#[tokio::test]
async fn test_connection_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let sql_file = dir.path().join("schema.sql");
    std::fs::write(&sql_file, "-- sql-up\nSELECT 1;\n").unwrap();

    let cli = Cli::try_parse_from([
        "sql-up",
        "-d",
        "sqlite3",
        "-c",
        "sqlite:///nonexistent-dir/app.db",
        "-f",
        sql_file.to_str().unwrap(),
    ])
    .unwrap();
    let err = execute_with(&cli, &ConnectorRegistry::with_defaults())
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("Failed to open database"), "{message}");
}
