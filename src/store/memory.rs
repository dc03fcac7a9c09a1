use super::LibraryStore;
use crate::error::{LibrisError, Result};
use crate::model::{Book, BorrowRecord, TransactionRecord};

/// In-memory backend for tests. Mirrors the file layout: a catalog snapshot
/// replaced on save, and two append-only logs. Can be switched into a
/// failing mode to exercise storage-error paths.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    catalog: Vec<Book>,
    transactions: Vec<TransactionRecord>,
    borrows: Vec<BorrowRecord>,
    save_count: usize,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Vec<Book>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Every write returns a storage error from here on.
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn saved_catalog(&self) -> &[Book] {
        &self.catalog
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn borrows(&self) -> &[BorrowRecord] {
        &self.borrows
    }

    /// How many times the catalog has been persisted.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            Err(LibrisError::Storage("write failure (injected)".to_string()))
        } else {
            Ok(())
        }
    }
}

impl LibraryStore for InMemoryStore {
    fn load_catalog(&self) -> Result<Vec<Book>> {
        Ok(self.catalog.clone())
    }

    fn save_catalog(&mut self, books: &[Book]) -> Result<()> {
        self.check_writable()?;
        self.catalog = books.to_vec();
        self.save_count += 1;
        Ok(())
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<()> {
        self.check_writable()?;
        self.transactions.push(record.clone());
        Ok(())
    }

    fn read_transactions(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.transactions.clone())
    }

    fn append_borrow(&mut self, record: &BorrowRecord) -> Result<()> {
        self.check_writable()?;
        self.borrows.push(record.clone());
        Ok(())
    }

    fn read_borrows(&self) -> Result<Vec<BorrowRecord>> {
        Ok(self.borrows.clone())
    }
}

// --- Test Fixtures ---
