use super::{Notice, OpReport};
use crate::catalog::Catalog;
use crate::error::{LibrisError, Result};
use crate::model::{Actor, ProcessType, Stamp, TransactionRecord};
use crate::search;
use crate::store::LibraryStore;

/// Return the first matching book. Writes one transaction row and clears
/// the in-memory flag. The borrow ledger is historical and keeps its row.
pub fn run<S: LibraryStore>(
    store: &mut S,
    catalog: &mut Catalog,
    stamp: &Stamp,
    actor: &Actor,
    title: &str,
) -> Result<OpReport> {
    let index = search::position_first(catalog, title)
        .ok_or_else(|| LibrisError::NotFound(format!("book '{}' not found", title)))?;
    let book = catalog
        .get(index)
        .cloned()
        .ok_or_else(|| LibrisError::NotFound(format!("book '{}' not found", title)))?;
    if !book.is_borrowed {
        return Err(LibrisError::Conflict(format!(
            "book '{}' is not currently borrowed",
            book.title
        )));
    }

    store.append_transaction(&TransactionRecord::new(
        ProcessType::Return,
        stamp,
        actor,
        &book.title,
        &book.id,
        None,
    ))?;
    if let Some(entry) = catalog.get_mut(index) {
        entry.is_borrowed = false;
    }

    let mut report = OpReport::success(format!(
        "Book '{}' returned successfully.",
        book.title
    ));
    report.push(Notice::info(format!("Process Id: {}", stamp.process_id)));
    report.push(Notice::info(format!("Process Type: {}", ProcessType::Return)));
    report.push(Notice::info(format!("Time: {}", stamp.timestamp_display())));
    report.push(Notice::info(format!("Customer: {}", actor.name)));
    report.affected.push(book);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::borrow;
    use crate::store::memory::fixtures::store_with;

    #[test]
    fn borrow_then_return_restores_flag_but_keeps_ledger_row() {
        let mut store = store_with(&["Dune"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        borrow::run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap();
        run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap();

        assert!(!catalog.books()[0].is_borrowed);
        assert_eq!(catalog.len(), 1);
        // The ledger is not rolled back by a return.
        assert_eq!(store.borrows().len(), 1);
        assert_eq!(store.transactions().len(), 2);
        assert_eq!(store.transactions()[1].process_type, ProcessType::Return);
        assert_eq!(store.transactions()[1].price, None);
    }

    #[test]
    fn returning_an_unborrowed_book_is_a_conflict() {
        let mut store = store_with(&["Dune"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        let err = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap_err();
        assert!(matches!(err, LibrisError::Conflict(_)));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn unknown_title_is_not_found() {
        let mut store = store_with(&["Dune"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");
        let err = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Solaris").unwrap_err();
        assert!(matches!(err, LibrisError::NotFound(_)));
    }
}
