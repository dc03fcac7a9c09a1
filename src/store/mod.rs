//! # Storage Layer
//!
//! Persistence for the catalog and the two append-only logs sits behind the
//! [`LibraryStore`] trait so the engine can run against different backends:
//!
//! - [`fs::FileStore`]: production CSV files
//!   - catalog: full rewrite on every structural change (temp file + rename)
//!   - transaction log and borrow ledger: single-row appends, never rewritten
//! - [`memory::InMemoryStore`]: in-memory backend for tests
//!
//! Each call opens, writes and closes its file within the call's scope; a
//! failed write surfaces as an error rather than crashing the process.

use crate::error::Result;
use crate::model::{Book, BorrowRecord, TransactionRecord};

pub mod fs;
pub mod memory;

pub const CATALOG_HEADER: [&str; 5] = ["id", "name_book", "author_name", "publication_date", "price"];
pub const TRANSACTION_HEADER: [&str; 7] = [
    "process_type",
    "timestamp",
    "customer_name",
    "customer_id",
    "book_name",
    "book_id",
    "price",
];
pub const BORROW_HEADER: [&str; 4] = ["customer_id", "customer_name", "book_name", "book_id"];

/// Abstract interface over the three persisted stores.
pub trait LibraryStore {
    /// Read the full catalog. Errors when the backing store is absent or a
    /// row is malformed; a bad row never yields a half-built book.
    fn load_catalog(&self) -> Result<Vec<Book>>;

    /// Persist the full ordered catalog, replacing prior content.
    fn save_catalog(&mut self, books: &[Book]) -> Result<()>;

    /// Append one row to the transaction log.
    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()>;

    /// All transaction rows in append order. An absent store reads as empty.
    fn read_transactions(&self) -> Result<Vec<TransactionRecord>>;

    /// Append one row to the borrow ledger.
    fn append_borrow(&mut self, record: &BorrowRecord) -> Result<()>;

    /// All ledger rows in append order. An absent store reads as empty.
    fn read_borrows(&self) -> Result<Vec<BorrowRecord>>;
}
