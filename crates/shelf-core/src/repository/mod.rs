//! Storage collaborator consumed by the services.
//!
//! [`Repository`] is the contract; [`MemoryStore`] is the in-process
//! implementation used by the demo server and the tests.

mod memory;
pub use memory::MemoryStore;

use shelf_model::{Book, EntityId, ListingFilter, ListingRequest, Task, TaskStatus};

use crate::error::CoreError;

/// Result of a windowed query: the requested slice plus the filtered total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<E> {
    pub items: Vec<E>,
    /// Count after filtering, before pagination.
    pub total: usize,
}

/// A persisted record the listing engine can filter and order.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Resource name used in errors and logs.
    const RESOURCE: &'static str;

    fn id(&self) -> Option<EntityId>;

    fn assign_id(&mut self, id: EntityId);

    fn title(&self) -> &str;

    fn status(&self) -> Option<TaskStatus> {
        None
    }

    /// Value that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Whether listings of this resource can be restricted by `filter`.
    fn supports(filter: &ListingFilter) -> bool {
        matches!(filter, ListingFilter::TitleContains(_))
    }

    fn matches(&self, filter: &ListingFilter) -> bool {
        match filter {
            ListingFilter::TitleContains(fragment) => self.title().contains(fragment.as_str()),
            ListingFilter::Status(status) => self.status() == Some(*status),
        }
    }
}

impl Entity for Task {
    const RESOURCE: &'static str = "task";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> Option<TaskStatus> {
        Some(self.status)
    }

    fn supports(_filter: &ListingFilter) -> bool {
        true
    }
}

impl Entity for Book {
    const RESOURCE: &'static str = "book";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.title)
    }
}

/// Storage contract.
///
/// Implementations own consistency: the services never coordinate concurrent
/// writers and assume last-write-wins unless an implementation says otherwise.
pub trait Repository<E: Entity>: Send + Sync {
    /// Filters, orders and windows the collection according to `request`.
    fn find_page(&self, request: &ListingRequest) -> Result<Slice<E>, CoreError>;

    fn find_by_id(&self, id: EntityId) -> Result<Option<E>, CoreError>;

    fn exists_by_id(&self, id: EntityId) -> Result<bool, CoreError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Inserts or replaces `entity`, assigning an identity on first save.
    ///
    /// Fails with [`CoreError::Conflict`] when another record holds the same
    /// [`Entity::unique_key`].
    fn save(&self, entity: E) -> Result<E, CoreError>;

    /// Removes the record; absent ids are a silent no-op.
    fn delete_by_id(&self, id: EntityId) -> Result<(), CoreError>;

    fn count(&self) -> Result<usize, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn task(title: &str, status: TaskStatus) -> Task {
        Task {
            id: None,
            title: title.into(),
            description: None,
            status,
            creation_date: SystemTime::now(),
            conclusion_date: None,
        }
    }

    #[test]
    fn title_match_is_case_sensitive() {
        let t = task("Tarefa 1", TaskStatus::Pending);
        assert!(t.matches(&ListingFilter::TitleContains("Tarefa".into())));
        assert!(t.matches(&ListingFilter::TitleContains("efa 1".into())));
        assert!(!t.matches(&ListingFilter::TitleContains("tarefa".into())));
        assert!(!t.matches(&ListingFilter::TitleContains("TAREFA".into())));
    }

    #[test]
    fn status_match_is_exact() {
        let t = task("Tarefa 1", TaskStatus::InProgress);
        assert!(t.matches(&ListingFilter::Status(TaskStatus::InProgress)));
        assert!(!t.matches(&ListingFilter::Status(TaskStatus::Done)));
    }

    #[test]
    fn books_do_not_support_status_filter() {
        assert!(Book::supports(&ListingFilter::TitleContains("x".into())));
        assert!(!Book::supports(&ListingFilter::Status(TaskStatus::Done)));
        assert!(Task::supports(&ListingFilter::Status(TaskStatus::Done)));
    }

    #[test]
    fn book_title_is_unique_key() {
        let book = Book {
            id: None,
            title: "Dom Casmurro".into(),
            author: "Machado de Assis".into(),
            year_of_publication: 1899,
        };
        assert_eq!(book.unique_key(), Some("Dom Casmurro"));
        assert_eq!(task("Tarefa 1", TaskStatus::Pending).unique_key(), None);
    }
}
