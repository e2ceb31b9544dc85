//! Task status transitions and the derived conclusion timestamp.
//!
//! Every status may move to every other status. The only side effect is on
//! `conclusion_date`:
//! - it is stamped with `now` when a task *enters* `DONE`;
//! - re-saving a task that is already `DONE` keeps the original stamp;
//! - leaving `DONE` keeps the stamp as well (it is never cleared automatically).
//!
//! `creation_date` is set by [`on_create`] and never touched afterwards.

use std::time::SystemTime;

use shelf_model::{Task, TaskDraft, TaskStatus};

/// Builds a new, not yet persisted task from a validated draft.
///
/// Status defaults to `PENDING`. A task created directly as `DONE` is
/// concluded at its creation instant.
pub fn on_create(draft: TaskDraft, now: SystemTime) -> Task {
    let status = draft.status.unwrap_or_default();
    Task {
        id: None,
        title: draft.title,
        description: draft.description,
        status,
        creation_date: now,
        conclusion_date: status.is_done().then_some(now),
    }
}

/// Applies `new_status` to `task`, diffing against the current status.
///
/// A `DONE` task that somehow lacks a stamp gets one, so a done task always
/// carries a conclusion date.
pub fn apply_status_change(mut task: Task, new_status: TaskStatus, now: SystemTime) -> Task {
    let entering_done = !task.status.is_done() && new_status.is_done();
    if entering_done || (new_status.is_done() && task.conclusion_date.is_none()) {
        task.conclusion_date = Some(now);
    }
    task.status = new_status;
    task
}
