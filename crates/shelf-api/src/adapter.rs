use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::{BookService, Listing, TaskService};
use shelf_model::{Book, BookDraft, EntityId, RawListing, Task, TaskDraft};

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges the core services to `ApiHandler`.
///
/// This is a ready-to-use implementation that directly delegates to the services.
pub struct ServiceApiAdapter {
    tasks: Arc<TaskService>,
    books: Arc<BookService>,
}

impl ServiceApiAdapter {
    /// Create a new adapter wrapping the given services.
    pub fn new(tasks: Arc<TaskService>, books: Arc<BookService>) -> Self {
        Self { tasks, books }
    }
}

#[async_trait]
impl ApiHandler for ServiceApiAdapter {
    async fn list_tasks(&self, query: RawListing) -> Result<Listing<Task>, ApiError> {
        self.tasks.list(&query).map_err(ApiError::from)
    }

    async fn get_task(&self, id: EntityId) -> Result<Task, ApiError> {
        self.tasks.find_by_id(id).map_err(ApiError::from)
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, ApiError> {
        self.tasks.create(draft).map_err(ApiError::from)
    }

    async fn update_task(&self, id: EntityId, draft: TaskDraft) -> Result<Task, ApiError> {
        self.tasks.update(id, draft).map_err(ApiError::from)
    }

    async fn delete_task(&self, id: EntityId) -> Result<(), ApiError> {
        self.tasks.delete(id).map_err(ApiError::from)
    }

    async fn list_books(&self, query: RawListing) -> Result<Listing<Book>, ApiError> {
        self.books.list(&query).map_err(ApiError::from)
    }

    async fn get_book(&self, id: EntityId) -> Result<Book, ApiError> {
        self.books.find_by_id(id).map_err(ApiError::from)
    }

    async fn create_book(&self, draft: BookDraft) -> Result<Book, ApiError> {
        self.books.create(draft).map_err(ApiError::from)
    }

    async fn update_book(&self, id: EntityId, draft: BookDraft) -> Result<Book, ApiError> {
        self.books.update(id, draft).map_err(ApiError::from)
    }

    async fn delete_book(&self, id: EntityId) -> Result<(), ApiError> {
        self.books.delete(id).map_err(ApiError::from)
    }
}
