use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::net::TcpListener;
use std::process::Command;

// Holding the port makes the server exit right after opening its store, so the
// startup log can be inspected.
fn occupied_address() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    (listener, addr)
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let (_listener, addr) = occupied_address();

    let mut cmd = Command::new(cargo_bin!("employee-payroll"));
    cmd.arg("--bind").arg(&addr).arg("--db-path").arg("some_db");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let (_listener, addr) = occupied_address();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("employee-payroll"));
    cmd.arg("--bind").arg(&addr).arg("--db-path").arg(&db_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Using RocksDB storage"))
        .stderr(predicate::str::contains("WARNING").not());
}
