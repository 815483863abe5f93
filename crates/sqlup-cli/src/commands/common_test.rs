use super::*;
use clap::Parser;
use sqlup_core::Dialect;
use std::path::PathBuf;

#[test]
fn test_resolve_from_flags() {
    let cli = Cli::try_parse_from([
        "sql-up",
        "-d",
        "mysql",
        "-c",
        "mysql://root@localhost/app",
        "-f",
        "schema.sql",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.dbms, Dialect::MySql);
    assert_eq!(config.sql_file, PathBuf::from("schema.sql"));
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sql-up.yml");
    std::fs::write(
        &path,
        "dbms: postgres\nconnection_string: postgres://db/app\nsql_file: schema.sql\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "sql-up",
        "--config",
        path.to_str().unwrap(),
        "-f",
        "other.sql",
    ])
    .unwrap();
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.dbms, Dialect::Postgres);
    assert_eq!(config.connection_string, "postgres://db/app");
    assert_eq!(config.sql_file, PathBuf::from("other.sql"));
}

#[test]
fn test_missing_config_file() {
    let cli = Cli::try_parse_from(["sql-up", "--config", "/nonexistent/sql-up.yml"]).unwrap();
    let err = resolve_config(&cli).unwrap_err();
    assert!(format!("{err:#}").contains("Config file not found"));
}

#[test]
fn test_unsupported_dbms() {
    let cli = Cli::try_parse_from(["sql-up", "-d", "oracle", "-c", "x", "-f", "y.sql"]).unwrap();
    let err = resolve_config(&cli).unwrap_err();
    assert!(err.to_string().contains("Unsupported DBMS: oracle"));
}
