use std::sync::Arc;

use shelf_model::{EntityId, RawListing, Task, TaskDraft};
use tracing::{info, instrument};

use crate::{
    clock::Clock,
    error::CoreError,
    lifecycle,
    listing::{self, Listing},
    repository::{Entity, Repository},
};

pub struct TaskService {
    repo: Arc<dyn Repository<Task>>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn Repository<Task>>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn list(&self, raw: &RawListing) -> Result<Listing<Task>, CoreError> {
        listing::list(self.repo.as_ref(), raw)
    }

    pub fn find_by_id(&self, id: EntityId) -> Result<Task, CoreError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| CoreError::not_found(Task::RESOURCE, id))
    }

    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub fn create(&self, draft: TaskDraft) -> Result<Task, CoreError> {
        draft.validate()?;
        let task = lifecycle::on_create(draft, self.clock.now());
        let saved = self.repo.save(task)?;
        info!(id = ?saved.id, status = %saved.status, "task created");
        Ok(saved)
    }

    /// Replaces the client-owned fields of an existing task.
    ///
    /// Identity and `creation_date` are kept; an omitted status keeps the
    /// current one. The status change goes through [`lifecycle::apply_status_change`].
    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    pub fn update(&self, id: EntityId, draft: TaskDraft) -> Result<Task, CoreError> {
        draft.validate()?;
        let current = self.find_by_id(id)?;
        let previous = current.status;
        let new_status = draft.status.unwrap_or(previous);

        let mut next = current;
        next.title = draft.title;
        next.description = draft.description;
        let next = lifecycle::apply_status_change(next, new_status, self.clock.now());

        let saved = self.repo.save(next)?;
        info!(id, from = %previous, to = %saved.status, "task updated");
        Ok(saved)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: EntityId) -> Result<(), CoreError> {
        if !self.repo.exists_by_id(id)? {
            return Err(CoreError::not_found(Task::RESOURCE, id));
        }
        self.repo.delete_by_id(id)?;
        info!(id, "task deleted");
        Ok(())
    }
}
