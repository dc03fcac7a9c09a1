//! Linear title search. Catalogs are small (hundreds of books), so a scan
//! beats maintaining an index.

use crate::catalog::Catalog;
use crate::model::Book;

/// True if any book title contains `query`, case-insensitively.
pub fn exists(catalog: &Catalog, query: &str) -> bool {
    position_first(catalog, query).is_some()
}

/// First match in canonical order. When several titles match, the earliest
/// wins; no disambiguation is offered.
pub fn find_first<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a Book> {
    position_first(catalog, query).and_then(|i| catalog.get(i))
}

pub fn position_first(catalog: &Catalog, query: &str) -> Option<usize> {
    let needle = query.to_lowercase();
    catalog
        .books()
        .iter()
        .position(|book| book.title.to_lowercase().contains(&needle))
}
