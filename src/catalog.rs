use crate::model::Book;

/// The authoritative ordered collection of books. Order is canonical: a
/// book's id always equals its 1-based position here once an operation has
/// completed. Persistence lives in the store layer; the catalog itself is
/// purely in-memory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Book> {
        self.books.get_mut(index)
    }

    /// The id the next added book receives.
    pub fn next_id(&self) -> String {
        (self.books.len() + 1).to_string()
    }

    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Remove every book whose title contains `query` (case-insensitive).
    /// Returns the removed books in canonical order.
    pub fn remove_matching(&mut self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        let mut removed = Vec::new();
        self.books.retain(|book| {
            if book.title.to_lowercase().contains(&needle) {
                removed.push(book.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        if index < self.books.len() {
            Some(self.books.remove(index))
        } else {
            None
        }
    }

    /// Reassign ids 1..N in current order. Called after every membership
    /// change; a no-op when ids are already contiguous.
    pub fn renumber_contiguous(&mut self) {
        for (index, book) in self.books.iter_mut().enumerate() {
            book.id = (index + 1).to_string();
        }
    }
}
