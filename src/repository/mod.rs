//! In-memory book store.
//!
//! The authoritative ordered collection of books, shared across handlers
//! behind a single mutex. Every operation takes the lock for the whole
//! read-modify-write, which is the only synchronization the service needs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::Book;

/// Handle to the shared book collection. Cloning is cheap and all clones
/// observe the same store.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<Mutex<Vec<Book>>>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        // No operation panics while holding the lock, but a poisoned store
        // is still usable: the data is valid at every release point.
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a book, preserving insertion order.
    pub fn insert(&self, book: Book) {
        self.lock().push(book);
    }

    /// Whether a live book currently uses the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().iter().any(|book| book.id == id)
    }

    /// Snapshot of the whole collection in insertion order.
    pub fn all(&self) -> Vec<Book> {
        self.lock().clone()
    }

    /// Linear scan for a book by id.
    pub fn get(&self, id: &str) -> Option<Book> {
        self.lock().iter().find(|book| book.id == id).cloned()
    }

    /// Mutate the book with the given id in place, keeping its position.
    /// Returns false when no book matches.
    pub fn update<F>(&self, id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Book),
    {
        let mut books = self.lock();
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                apply(book);
                true
            }
            None => false,
        }
    }

    /// Remove the book with the given id, preserving the order of the rest.
    /// Returns false when no book matches.
    pub fn remove(&self, id: &str) -> bool {
        let mut books = self.lock();
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
