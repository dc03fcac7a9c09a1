use super::{Notice, OpReport};
use crate::catalog::Catalog;
use crate::error::{LibrisError, Result};
use crate::model::{Actor, ProcessType, Stamp, TransactionRecord};
use crate::search;
use crate::store::LibraryStore;

/// Buy the first matching book: remove it from the catalog, renumber,
/// persist, then log the sale with its price. A borrowed book cannot be
/// bought.
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
            "book '{}' is borrowed and cannot be bought",
            book.title
        )));
    }

    let mut next = catalog.clone();
    next.remove_at(index);
    next.renumber_contiguous();
    store.save_catalog(next.books())?;
    *catalog = next;

    // The sale row records the id the book held before renumbering.
    store.append_transaction(&TransactionRecord::new(
        ProcessType::Buy,
        stamp,
        actor,
        &book.title,
        &book.id,
        Some(book.price),
    ))?;

    let mut report = OpReport::success(format!(
        "Book '{}' bought for {}.",
        book.title,
        book.price_display()
    ));
    report.push(Notice::info(format!("Process Id: {}", stamp.process_id)));
    report.push(Notice::info(format!("Process Type: {}", ProcessType::Buy)));
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
    fn buy_removes_renumbers_and_logs_price() {
        let mut store = store_with(&["Dune", "Hyperion", "Solaris"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        let report = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Hyperion").unwrap();
        assert!(report.completed);
        assert_eq!(catalog.len(), 2);
        let ids: Vec<&str> = catalog.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(store.saved_catalog().len(), 2);

        let tx = &store.transactions()[0];
        assert_eq!(tx.process_type, ProcessType::Buy);
        assert_eq!(tx.book_title, "Hyperion");
        assert_eq!(tx.book_id, "2");
        assert_eq!(tx.price_display(), "10.00");
    }

    #[test]
    fn buying_a_borrowed_book_is_rejected_without_any_write() {
        let mut store = InMemoryStore::with_catalog(vec![borrowed_book("1", "Dune")]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let actor = Actor::new("Ana");

        let err = run(&mut store, &mut catalog, &Stamp::now(), &actor, "Dune").unwrap_err();
        assert!(matches!(err, LibrisError::Conflict(_)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.books()[0].title, "Dune");
        assert_eq!(store.save_count(), 0);
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
