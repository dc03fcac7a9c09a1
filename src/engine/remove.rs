use super::OpReport;
use crate::catalog::Catalog;
use crate::error::{LibrisError, Result};
use crate::search;
use crate::store::LibraryStore;

/// Remove every book whose title matches the query, then renumber. Refused
/// outright when any matching book is borrowed.
pub fn run<S: LibraryStore>(store: &mut S, catalog: &mut Catalog, title: &str) -> Result<OpReport> {
    if !search::exists(catalog, title) {
        return Err(LibrisError::NotFound(format!("book '{}' not found", title)));
    }
    let needle = title.to_lowercase();
    if catalog
        .books()
        .iter()
        .any(|b| b.title.to_lowercase().contains(&needle) && b.is_borrowed)
    {
        return Err(LibrisError::Conflict(format!(
            "cannot remove '{}' while a matching book is borrowed",
            title
        )));
    }

    let mut next = catalog.clone();
    let removed = next.remove_matching(title);
    next.renumber_contiguous();
    store.save_catalog(next.books())?;
    *catalog = next;

    let mut report = OpReport::success(format!(
        "Removed {} book(s) matching '{}'.",
        removed.len(),
        title
    ));
    report.affected = removed;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{borrowed_book, store_with};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn removes_all_matches_and_renumbers() {
        let mut store = store_with(&["Dune", "Hyperion", "Dune Messiah"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());

        let report = run(&mut store, &mut catalog, "dune").unwrap();
        assert!(report.completed);
        assert_eq!(report.affected.len(), 2);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.books()[0].title, "Hyperion");
        assert_eq!(catalog.books()[0].id, "1");
        assert_eq!(store.saved_catalog().len(), 1);
    }

    #[test]
    fn borrowed_match_blocks_removal_without_mutation() {
        let mut store = InMemoryStore::with_catalog(vec![borrowed_book("1", "Dune")]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());

        let err = run(&mut store, &mut catalog, "Dune").unwrap_err();
        assert!(matches!(err, LibrisError::Conflict(_)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn unknown_title_is_not_found() {
        let mut store = store_with(&["Dune"]);
        let mut catalog = Catalog::new(store.load_catalog().unwrap());
        let err = run(&mut store, &mut catalog, "Hyperion").unwrap_err();
        assert!(matches!(err, LibrisError::NotFound(_)));
    }
}
