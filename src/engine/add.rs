use super::OpReport;
use crate::catalog::Catalog;
use crate::error::{LibrisError, Result};
use crate::model::Book;
use crate::search;
use crate::store::LibraryStore;

/// Add a book. Rejected when any existing title matches the requested one.
/// Adds are not written to the transaction log, matching the log's contract:
/// only Borrow, Return and Buy rows appear there.
pub fn run<S: LibraryStore>(
    store: &mut S,
    catalog: &mut Catalog,
    title: &str,
    author: &str,
    published: &str,
    price: &str,
) -> Result<OpReport> {
    if search::exists(catalog, title) {
        return Err(LibrisError::Conflict(format!(
            "book '{}' already exists",
            title
        )));
    }
    let book = Book::parse(catalog.next_id(), title, author, published, price)?;

    // Mutate a copy, persist it, then commit, so a failed save leaves the
    // in-memory catalog untouched.
    let mut next = catalog.clone();
    next.push(book.clone());
    store.save_catalog(next.books())?;
    *catalog = next;

    let mut report = OpReport::success(format!(
        "Book '{}' added with id {}.",
        book.title, book.id
    ));
    report.affected.push(book);
    Ok(report)
}
