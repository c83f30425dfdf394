use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.env_remove("STAFFROLL_LOG")
        .args(["--db-path", "some_db", "employee", "list"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("id,first_name"))
        .stderr(predicate::str::contains("Falling back to in-memory storage"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.env_remove("STAFFROLL_LOG")
        .arg("--db-path")
        .arg(&db_path)
        .args(["employee", "list"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back").not());
}

#[test]
fn test_db_path_from_environment() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(cargo_bin!("staffroll"));
    cmd.env_remove("STAFFROLL_LOG")
        .env("STAFFROLL_DB_PATH", dir.path().join("env_db"))
        .args(["department", "list"]);

    let assert = cmd.assert().success();
    if cfg!(feature = "storage-rocksdb") {
        assert.stderr(predicate::str::contains("using RocksDB storage"));
    } else {
        assert.stderr(predicate::str::contains("Falling back to in-memory storage"));
    }
}
