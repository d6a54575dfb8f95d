use crate::domain::ports::{EmployeeStoreBox, NotifierBox};
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryEmployeeStore;
use crate::infrastructure::notifier::{HttpNotifier, LogNotifier};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Employee payroll service: stores employee records and publishes a message
/// whenever an update changes an employee's monthly allowance.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYROLL_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Destination URL allowance update messages are POSTed to.
    /// Without it, messages are only written to the log.
    #[arg(long, env = "NOTIFICATION_SERVICE_QUEUE_URL")]
    pub notification_url: Option<String>,

    /// Timeout in seconds for delivering one allowance update message
    #[arg(long, default_value_t = 5)]
    pub notification_timeout_secs: u64,
}

impl Config {
    /// Opens the record store selected by `--db-path`.
    pub fn open_store(&self) -> Result<EmployeeStoreBox> {
        match &self.db_path {
            Some(path) => open_persistent_store(path),
            None => {
                info!("Using in-memory storage");
                Ok(Box::new(InMemoryEmployeeStore::new()))
            }
        }
    }

    /// Builds the notifier selected by `--notification-url`.
    pub fn notifier(&self) -> Result<NotifierBox> {
        match &self.notification_url {
            Some(url) => {
                info!(destination = %url, "Publishing allowance updates over HTTP");
                let timeout = Duration::from_secs(self.notification_timeout_secs);
                Ok(Box::new(HttpNotifier::new(url.clone(), timeout)?))
            }
            None => {
                warn!("No notification destination configured; allowance updates will only be logged");
                Ok(Box::new(LogNotifier))
            }
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent_store(path: &std::path::Path) -> Result<EmployeeStoreBox> {
    info!(path = %path.display(), "Using RocksDB storage");
    Ok(Box::new(crate::infrastructure::rocksdb::RocksDBStore::open(path)?))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent_store(_path: &std::path::Path) -> Result<EmployeeStoreBox> {
    warn!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(Box::new(InMemoryEmployeeStore::new()))
}
