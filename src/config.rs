use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LibrisError, Result};

const DEFAULT_CATALOG: &str = "books.csv";
const DEFAULT_TRANSACTION_LOG: &str = "transactions.csv";
const DEFAULT_BORROW_LEDGER: &str = "borrowed_books.csv";

/// Where the three persisted stores live. Paths are always passed in
/// explicitly; nothing in the store layer hardcodes a filename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    #[serde(default = "default_transaction_log_path")]
    pub transaction_log_path: PathBuf,

    #[serde(default = "default_borrow_ledger_path")]
    pub borrow_ledger_path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG)
}

fn default_transaction_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_TRANSACTION_LOG)
}

fn default_borrow_ledger_path() -> PathBuf {
    PathBuf::from(DEFAULT_BORROW_LEDGER)
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            transaction_log_path: default_transaction_log_path(),
            borrow_ledger_path: default_borrow_ledger_path(),
        }
    }
}

impl LibrisConfig {
    /// Load config from an explicitly named JSON file. Unlike defaults, a
    /// requested file that cannot be read is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LibrisError::Storage(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config: LibrisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
