use async_trait::async_trait;
use shelf_core::Listing;
use shelf_model::{Book, BookDraft, EntityId, RawListing, Task, TaskDraft};

use crate::error::ApiError;

/// Operations behind the task and book routes.
///
/// [`HttpApi`](crate::HttpApi) only decodes requests and renders responses;
/// everything else goes through this trait. [`ServiceApiAdapter`](crate::ServiceApiAdapter)
/// forwards to the core services, and tests can stand in their own impl.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// List tasks page by page, optionally filtered by title fragment or status.
    async fn list_tasks(&self, query: RawListing) -> Result<Listing<Task>, ApiError>;

    async fn get_task(&self, id: EntityId) -> Result<Task, ApiError>;

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, ApiError>;

    /// Replace a task; status changes go through the task lifecycle.
    async fn update_task(&self, id: EntityId, draft: TaskDraft) -> Result<Task, ApiError>;

    async fn delete_task(&self, id: EntityId) -> Result<(), ApiError>;

    /// List books page by page, optionally filtered by title fragment.
    async fn list_books(&self, query: RawListing) -> Result<Listing<Book>, ApiError>;

    async fn get_book(&self, id: EntityId) -> Result<Book, ApiError>;

    async fn create_book(&self, draft: BookDraft) -> Result<Book, ApiError>;

    async fn update_book(&self, id: EntityId, draft: BookDraft) -> Result<Book, ApiError>;

    async fn delete_book(&self, id: EntityId) -> Result<(), ApiError>;
}
