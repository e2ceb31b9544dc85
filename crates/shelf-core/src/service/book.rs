use std::sync::Arc;

use shelf_model::{Book, BookDraft, EntityId, RawListing};
use tracing::{info, instrument};

use crate::{
    clock::Clock,
    error::CoreError,
    listing::{self, Listing},
    repository::{Entity, Repository},
};

/// Catalog operations. Title uniqueness is enforced by the repository.
pub struct BookService {
    repo: Arc<dyn Repository<Book>>,
    clock: Arc<dyn Clock>,
}

impl BookService {
    pub fn new(repo: Arc<dyn Repository<Book>>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn list(&self, raw: &RawListing) -> Result<Listing<Book>, CoreError> {
        listing::list(self.repo.as_ref(), raw)
    }

    pub fn find_by_id(&self, id: EntityId) -> Result<Book, CoreError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| CoreError::not_found(Book::RESOURCE, id))
    }

    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub fn create(&self, draft: BookDraft) -> Result<Book, CoreError> {
        draft.validate(self.clock.current_year())?;
        let saved = self.repo.save(draft.into_book())?;
        info!(id = ?saved.id, "book created");
        Ok(saved)
    }

    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub fn update(&self, id: EntityId, draft: BookDraft) -> Result<Book, CoreError> {
        draft.validate(self.clock.current_year())?;
        let mut book = self.find_by_id(id)?;
        book.title = draft.title;
        book.author = draft.author;
        book.year_of_publication = draft.year_of_publication;

        let saved = self.repo.save(book)?;
        info!(id, "book updated");
        Ok(saved)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: EntityId) -> Result<(), CoreError> {
        if !self.repo.exists_by_id(id)? {
            return Err(CoreError::not_found(Book::RESOURCE, id));
        }
        self.repo.delete_by_id(id)?;
        info!(id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, ManualClock, MemoryStore};
    use std::time::{Duration, UNIX_EPOCH};

    fn service() -> BookService {
        // 2023-11-14T22:13:20Z
        let clock = Arc::new(ManualClock::new(UNIX_EPOCH + Duration::from_secs(1_700_000_000)));
        BookService::new(Arc::new(MemoryStore::<Book>::new()), clock)
    }

    fn draft(title: &str) -> BookDraft {
        BookDraft::new(title, "Machado de Assis", 1899)
    }

    #[test]
    fn create_and_find() {
        let svc = service();
        let book = svc.create(draft("Dom Casmurro")).unwrap();
        assert_eq!(book.id, Some(1));
        assert_eq!(svc.find_by_id(1).unwrap(), book);
    }

    #[test]
    fn duplicate_title_is_conflict() {
        let svc = service();
        svc.create(draft("Dom Casmurro")).unwrap();
        let err = svc.create(draft("Dom Casmurro")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn year_is_checked_against_clock() {
        let svc = service();
        assert!(svc.create(BookDraft::new("Recent Book", "Some Author", 2023)).is_ok());
        let err = svc
            .create(BookDraft::new("Future Book", "Some Author", 2024))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn update_replaces_fields() {
        let svc = service();
        svc.create(draft("Dom Casmurro")).unwrap();
        let updated = svc
            .update(1, BookDraft::new("Memórias Póstumas", "Machado de Assis", 1881))
            .unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.title, "Memórias Póstumas");
        assert_eq!(updated.year_of_publication, 1881);
    }

    #[test]
    fn update_into_existing_title_is_conflict() {
        let svc = service();
        svc.create(draft("Dom Casmurro")).unwrap();
        svc.create(draft("Quincas Borba")).unwrap();
        let err = svc.update(2, draft("Dom Casmurro")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn update_and_delete_missing_are_not_found() {
        let svc = service();
        assert_eq!(svc.update(9, draft("Dom Casmurro")).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(svc.delete(9).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn list_by_title_fragment() {
        let svc = service();
        svc.create(draft("Dom Casmurro")).unwrap();
        svc.create(draft("Quincas Borba")).unwrap();

        let listing = svc.list(&RawListing::new().with_title("Casmurro")).unwrap();
        assert_eq!(listing.page.total_elements, 1);
        assert_eq!(listing.page.items[0].title, "Dom Casmurro");
    }

    #[test]
    fn list_by_status_is_invalid_filter() {
        let svc = service();
        let err = svc.list(&RawListing::new().with_status("DONE")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFilter);
    }
}
