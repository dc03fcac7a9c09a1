//! # Operation Engine
//!
//! The five inventory operations as one [`Operation`] sum type, dispatched
//! by [`Engine::execute`]. Each handler lives in its own module and follows
//! the same shape: validate preconditions against the catalog, mutate,
//! persist, log. Precondition failures come back as a normal [`OpReport`]
//! with an error notice; only storage failures propagate as `Err`, and the
//! session loop catches those too.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{Actor, Book, BorrowRecord, Stamp, TransactionRecord};
use crate::store::LibraryStore;

pub mod add;
pub mod borrow;
pub mod buy;
pub mod remove;
pub mod return_book;

/// One requested mutation. Title fields are raw UI strings; Add's date and
/// price are parsed (and rejected) inside the handler.
#[derive(Debug, Clone)]
pub enum Operation {
    Add {
        title: String,
        author: String,
        published: String,
        price: String,
    },
    Remove { title: String },
    Borrow { title: String },
    Return { title: String },
    Buy { title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// One line of user-facing outcome. The engine never prints; the session
/// renders these through its UI collaborator.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct OpReport {
    pub completed: bool,
    pub notices: Vec<Notice>,
    pub affected: Vec<Book>,
}

impl OpReport {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            completed: true,
            notices: vec![Notice::success(text)],
            affected: Vec::new(),
        }
    }

    pub fn rejected(text: impl Into<String>) -> Self {
        Self {
            completed: false,
            notices: vec![Notice::error(text)],
            affected: Vec::new(),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Owns the in-memory catalog and the backing store, and keeps the two
/// reconciled: no handler reports success before its writes have landed.
#[derive(Debug)]
pub struct Engine<S: LibraryStore> {
    store: S,
    catalog: Catalog,
}

impl<S: LibraryStore> Engine<S> {
    pub fn load(store: S) -> Result<Self> {
        let catalog = Catalog::new(store.load_catalog()?);
        Ok(Self { store, catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        self.store.read_transactions()
    }

    pub fn borrows(&self) -> Result<Vec<BorrowRecord>> {
        self.store.read_borrows()
    }

    /// Run one operation for `actor`. The stamp (process id + capture-time
    /// timestamp) is taken here, before any validation or I/O.
    pub fn execute(&mut self, actor: &Actor, operation: Operation) -> Result<OpReport> {
        let stamp = Stamp::now();
        let outcome = match operation {
            Operation::Add {
                title,
                author,
                published,
                price,
            } => add::run(
                &mut self.store,
                &mut self.catalog,
                &title,
                &author,
                &published,
                &price,
            ),
            Operation::Remove { title } => remove::run(&mut self.store, &mut self.catalog, &title),
            Operation::Borrow { title } => {
                borrow::run(&mut self.store, &mut self.catalog, &stamp, actor, &title)
            }
            Operation::Return { title } => {
                return_book::run(&mut self.store, &mut self.catalog, &stamp, actor, &title)
            }
            Operation::Buy { title } => {
                buy::run(&mut self.store, &mut self.catalog, &stamp, actor, &title)
            }
        };
        match outcome {
            Ok(report) => Ok(report),
            Err(e) if e.is_user_error() => Ok(OpReport::rejected(e.to_string())),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibrisError;
    use crate::store::memory::fixtures::store_with;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn user_errors_become_rejected_reports() {
        let mut engine = Engine::load(InMemoryStore::new()).unwrap();
        let actor = Actor::new("Ana");
        let report = engine
            .execute(
                &actor,
                Operation::Borrow {
                    title: "Dune".into(),
                },
            )
            .unwrap();
        assert!(!report.completed);
        assert_eq!(report.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn storage_errors_propagate() {
        let mut store = store_with(&["Dune"]);
        store.fail_writes();
        let mut engine = Engine::load(store).unwrap();
        let actor = Actor::new("Ana");
        let err = engine
            .execute(
                &actor,
                Operation::Borrow {
                    title: "Dune".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, LibrisError::Storage(_)));
    }
}
