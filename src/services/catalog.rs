//! Catalog management service
//!
//! The five bookshelf operations, composed from payload validation and the
//! in-memory repository. Validation always runs to completion before the
//! store is touched, so a rejected request never leaves a partial write.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, ValidationError},
    models::{book::parse_flag, Book, BookPayload, BookQuery, BookSummary},
    repository::Repository,
    services::ids::IdProvider,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    ids: Arc<dyn IdProvider>,
}

/// Gate a create/update payload. Pure; checks apply in a fixed order: name
/// presence first, then page consistency. The page check only fires when
/// both counts are supplied.
fn validate(payload: &BookPayload) -> Result<(), ValidationError> {
    match payload.name.as_deref() {
        None | Some("") => return Err(ValidationError::MissingName),
        Some(_) => {}
    }

    if let (Some(page_count), Some(read_page)) = (payload.page_count, payload.read_page) {
        if read_page > page_count {
            return Err(ValidationError::ReadPageExceedsPageCount);
        }
    }

    Ok(())
}

impl CatalogService {
    pub fn new(repository: Repository, ids: Arc<dyn IdProvider>) -> Self {
        Self { repository, ids }
    }

    /// Create a new book and return its assigned id.
    pub fn create_book(&self, payload: BookPayload) -> AppResult<String> {
        validate(&payload).map_err(|source| AppError::validation("add", source))?;

        // The provider guarantees uniqueness in practice; the retry keeps
        // the store's id-uniqueness invariant unconditional.
        let mut id = self.ids.generate();
        while self.repository.contains(&id) {
            id = self.ids.generate();
        }

        let finished = payload.finished();
        let now = Utc::now();
        let book = Book {
            id: id.clone(),
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        };

        self.repository.insert(book);
        tracing::debug!(book_id = %id, "book added to shelf");
        Ok(id)
    }

    /// List books, applying at most one filter: name takes precedence over
    /// reading, which takes precedence over finished. A flag parameter with
    /// a value other than "0"/"1" is ignored and the next filter in
    /// priority order gets its turn. Full linear scan over the store.
    pub fn list_books(&self, query: &BookQuery) -> Vec<BookSummary> {
        let books = self.repository.all();

        let filtered: Vec<&Book> = if let Some(name) = query.name.as_deref() {
            let needle = name.to_lowercase();
            books
                .iter()
                .filter(|book| book.name.to_lowercase().contains(&needle))
                .collect()
        } else if let Some(want) = flag(query.reading.as_deref(), "reading") {
            // A record without a reading value matches neither flag.
            books
                .iter()
                .filter(|book| book.reading == Some(want))
                .collect()
        } else if let Some(want) = flag(query.finished.as_deref(), "finished") {
            books
                .iter()
                .filter(|book| book.finished == want)
                .collect()
        } else {
            books.iter().collect()
        };

        filtered.into_iter().map(BookSummary::from).collect()
    }

    /// Get the full record for one book.
    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository
            .get(id)
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Full-replace update: every field except `id` and `insertedAt` is
    /// overwritten from the payload. Validation runs before the id lookup,
    /// so a bad payload fails with 400 even for an unknown id.
    pub fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        validate(&payload).map_err(|source| AppError::validation("update", source))?;

        let finished = payload.finished();
        let now = Utc::now();
        let updated = self.repository.update(id, move |book| {
            book.name = payload.name.unwrap_or_default();
            book.year = payload.year;
            book.author = payload.author;
            book.summary = payload.summary;
            book.publisher = payload.publisher;
            book.page_count = payload.page_count;
            book.read_page = payload.read_page;
            book.finished = finished;
            book.reading = payload.reading;
            book.updated_at = now;
        });

        if updated {
            tracing::debug!(book_id = %id, "book updated");
            Ok(())
        } else {
            Err(AppError::NotFound(
                "Failed to update book. ID not found.".to_string(),
            ))
        }
    }

    /// Remove one book from the shelf.
    pub fn delete_book(&self, id: &str) -> AppResult<()> {
        if self.repository.remove(id) {
            tracing::debug!(book_id = %id, "book deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(
                "Failed to delete book. ID not found.".to_string(),
            ))
        }
    }
}

/// Parse a textual flag parameter, logging values that disable the filter.
fn flag(raw: Option<&str>, param: &'static str) -> Option<bool> {
    let raw = raw?;
    let parsed = parse_flag(raw);
    if parsed.is_none() {
        tracing::debug!(param, value = raw, "ignoring filter with non-flag value");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic ids: "book-1", "book-2", ...
    struct SequentialIds(AtomicUsize);

    impl IdProvider for SequentialIds {
        fn generate(&self) -> String {
            format!("book-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Repository::new(), Arc::new(SequentialIds(AtomicUsize::new(0))))
    }

    fn payload(name: &str, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            page_count: Some(page_count),
            read_page: Some(read_page),
            ..Default::default()
        }
    }

    fn query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> BookQuery {
        BookQuery {
            name: name.map(str::to_string),
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        }
    }

    #[test]
    fn test_create_returns_resolvable_id() {
        let catalog = service();
        let id = catalog.create_book(payload("Tech", 200, 100)).unwrap();

        let book = catalog.get_book(&id).unwrap();
        assert_eq!(book.name, "Tech");
        assert_eq!(book.inserted_at, book.updated_at);
        assert!(!book.finished);
        assert_eq!(catalog.list_books(&BookQuery::default()).len(), 1);
    }

    #[test]
    fn test_create_rejects_missing_name() {
        let catalog = service();

        let err = catalog.create_book(BookPayload::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to add book. Please provide a book name."
        );

        let err = catalog
            .create_book(BookPayload {
                name: Some(String::new()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation {
                source: ValidationError::MissingName,
                ..
            }
        ));

        assert!(catalog.list_books(&BookQuery::default()).is_empty());
    }

    #[test]
    fn test_create_rejects_read_page_beyond_page_count() {
        let catalog = service();

        let err = catalog.create_book(payload("Oops", 100, 150)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to add book. readPage cannot be greater than pageCount."
        );
        assert!(catalog.list_books(&BookQuery::default()).is_empty());
    }

    #[test]
    fn test_finished_derivation_on_create_and_update() {
        let catalog = service();
        let id = catalog.create_book(payload("Tech", 200, 200)).unwrap();
        assert!(catalog.get_book(&id).unwrap().finished);

        catalog.update_book(&id, payload("Tech", 200, 150)).unwrap();
        assert!(!catalog.get_book(&id).unwrap().finished);
    }

    #[test]
    fn test_update_replaces_all_fields_and_keeps_position() {
        let catalog = service();
        let first = catalog.create_book(payload("First", 100, 0)).unwrap();
        let second = catalog.create_book(payload("Second", 100, 0)).unwrap();

        let replacement = BookPayload {
            name: Some("First, revised".to_string()),
            author: Some("Someone".to_string()),
            ..Default::default()
        };
        catalog.update_book(&first, replacement).unwrap();

        let book = catalog.get_book(&first).unwrap();
        assert_eq!(book.id, first);
        assert_eq!(book.name, "First, revised");
        assert_eq!(book.author.as_deref(), Some("Someone"));
        // Fields not resupplied are cleared: full replace, not a patch.
        assert_eq!(book.page_count, None);

        let order: Vec<_> = catalog
            .list_books(&BookQuery::default())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(order, [first, second]);
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let catalog = service();

        // Invalid payload against an unknown id reports the 400, not the 404.
        let err = catalog
            .update_book("missing", payload("X", 100, 150))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = catalog
            .update_book("missing", payload("X", 100, 50))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update book. ID not found.");
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let catalog = service();
        let first = catalog.create_book(payload("First", 10, 0)).unwrap();
        let second = catalog.create_book(payload("Second", 10, 0)).unwrap();
        let third = catalog.create_book(payload("Third", 10, 0)).unwrap();

        catalog.delete_book(&second).unwrap();
        assert!(catalog.get_book(&second).is_err());
        assert!(catalog.delete_book(&second).is_err());

        let order: Vec<_> = catalog
            .list_books(&BookQuery::default())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(order, [first, third]);
    }

    #[test]
    fn test_list_filters_by_name_case_insensitively() {
        let catalog = service();
        catalog.create_book(payload("Modern Tech", 10, 0)).unwrap();
        catalog.create_book(payload("Something Else", 10, 0)).unwrap();

        let books = catalog.list_books(&query(Some("tech"), None, None));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Modern Tech");
    }

    #[test]
    fn test_list_filters_by_reading_and_finished() {
        let catalog = service();
        catalog
            .create_book(BookPayload {
                reading: Some(true),
                ..payload("Tech", 200, 200)
            })
            .unwrap();
        catalog
            .create_book(BookPayload {
                reading: Some(false),
                ..payload("Half", 200, 100)
            })
            .unwrap();
        // No reading value at all: excluded from both reading filters.
        catalog.create_book(payload("Quiet", 200, 100)).unwrap();

        let finished = catalog.list_books(&query(None, None, Some("1")));
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].name, "Tech");

        let not_reading = catalog.list_books(&query(None, Some("0"), None));
        assert_eq!(not_reading.len(), 1);
        assert_eq!(not_reading[0].name, "Half");
    }

    #[test]
    fn test_list_filter_priority_name_wins() {
        let catalog = service();
        catalog
            .create_book(BookPayload {
                reading: Some(true),
                ..payload("Alpha", 10, 0)
            })
            .unwrap();
        catalog.create_book(payload("Beta", 10, 0)).unwrap();

        // Both name and reading supplied: only the name filter applies.
        let books = catalog.list_books(&query(Some("beta"), Some("1"), None));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Beta");
    }

    #[test]
    fn test_list_ignores_non_flag_values() {
        let catalog = service();
        catalog
            .create_book(BookPayload {
                reading: Some(true),
                ..payload("Alpha", 10, 0)
            })
            .unwrap();
        catalog.create_book(payload("Beta", 200, 200)).unwrap();

        // reading=yes is not a flag, so it falls through to finished=1.
        let books = catalog.list_books(&query(None, Some("yes"), Some("1")));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Beta");
    }
}
