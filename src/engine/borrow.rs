use super::{Notice, OpReport};
use crate::catalog::Catalog;
use crate::error::{LibrisError, Result};
use crate::model::{Actor, BorrowRecord, ProcessType, Stamp, TransactionRecord};
use crate::search;
use crate::store::LibraryStore;

/// Borrow the first matching book. Writes one transaction row and one
/// ledger row, then flips the in-memory flag. Membership and the persisted
/// catalog are untouched; borrow state lives for the session only.
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
    if book.is_borrowed {
        return Err(LibrisError::Conflict(format!(
            "book '{}' is already borrowed",
            book.title
        )));
    }

    store.append_transaction(&TransactionRecord::new(
        ProcessType::Borrow,
        stamp,
        actor,
        &book.title,
        &book.id,
        None,
    ))?;
    store.append_borrow(&BorrowRecord::new(actor, &book))?;
    if let Some(entry) = catalog.get_mut(index) {
        entry.is_borrowed = true;
    }

    let mut report = OpReport::success(format!(
        "Book '{}' borrowed successfully.",
        book.title
    ));
    report.push(Notice::info(format!("Process Id: {}", stamp.process_id)));
    report.push(Notice::info(format!("Process Type: {}", ProcessType::Borrow)));
    report.push(Notice::info(format!("Time: {}", stamp.timestamp_display())));
    report.push(Notice::info(format!("Customer: {}", actor.name)));
    report.affected.push(book);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{borrowed_book, store_with};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn borrow_flips_flag_and_writes_both_logs() {
        let mut store = store_with(&["Dune"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");
        let stamp = Stamp::now();

        let report = run(&mut store, &mut catalog, &stamp, &actor, "Dune").unwrap();
        assert!(report.completed);
        assert!(catalog.books()[0].is_borrowed);

        assert_eq!(store.transactions().len(), 1);
        let tx = &store.transactions()[0];
        assert_eq!(tx.process_type, ProcessType::Borrow);
        assert_eq!(tx.price, None);
        assert_eq!(tx.book_id, "1");
        assert_eq!(tx.actor_id, actor.id.to_string());

        assert_eq!(store.borrows().len(), 1);
        let row = &store.borrows()[0];
        assert_eq!(row.actor_name, "Ana");
        assert_eq!(row.book_title, "Dune");
        assert_eq!(row.book_id, "1");

        // Borrowing changes no membership, so the catalog is not re-persisted.
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn first_match_in_canonical_order_is_borrowed() {
        let mut store = store_with(&["Dune", "Dune Messiah"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        run(&mut store, &mut catalog, &Stamp::now(), &actor, "dune").unwrap();
        assert!(catalog.books()[0].is_borrowed);
        assert!(!catalog.books()[1].is_borrowed);
    }

    #[test]
    fn already_borrowed_is_a_conflict_with_no_log_rows() {
        let mut store = InMemoryStore::with_catalog(vec![borrowed_book("1", "Dune")]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        let err = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap_err();
        assert!(matches!(err, LibrisError::Conflict(_)));
        assert!(store.transactions().is_empty());
        assert!(store.borrows().is_empty());
    }

    #[test]
    fn unknown_title_is_not_found() {
        let mut store = InMemoryStore::new();
        let mut catalog = Catalog::default();
        let actor = Actor::new("Ana");
        let err = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap_err();
        assert!(matches!(err, LibrisError::NotFound(_)));
    }
}
