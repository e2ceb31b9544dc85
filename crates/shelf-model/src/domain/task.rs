use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::{EntityId, TaskStatus, time_serde, validate};
use crate::ModelError;

/// A tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Repository-assigned identity; `None` until the first save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Stamped once, when the task is created.
    #[serde(with = "time_serde")]
    pub creation_date: SystemTime,
    /// Stamped when the task enters [`TaskStatus::Done`].
    #[serde(default, with = "time_serde::option")]
    pub conclusion_date: Option<SystemTime>,
}

/// Client-supplied fields for creating or replacing a task.
///
/// Identity and timestamps are owned by the server and never read from input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to [`TaskStatus::Pending`] on create, and to the current status on update.
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required_text("title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> Task {
        Task {
            id: Some(7),
            title: "Tarefa 1".to_string(),
            description: Some("Iniciando Tarefa Teste 1".to_string()),
            status: TaskStatus::Done,
            creation_date: UNIX_EPOCH + Duration::from_secs(1_673_776_800),
            conclusion_date: Some(UNIX_EPOCH + Duration::from_secs(1_674_237_600)),
        }
    }

    #[test]
    fn task_serde_roundtrip() {
        let task = sample();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn task_dates_are_rfc3339() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["creationDate"], "2023-01-15T10:00:00Z");
        assert_eq!(json["conclusionDate"], "2023-01-20T18:00:00Z");
        assert_eq!(json["status"], "DONE");
    }

    #[test]
    fn open_task_serializes_null_conclusion() {
        let mut task = sample();
        task.status = TaskStatus::Pending;
        task.conclusion_date = None;
        task.description = None;

        let json = serde_json::to_value(&task).unwrap();
        assert!(json["conclusionDate"].is_null());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn draft_ignores_server_owned_fields() {
        let draft: TaskDraft = serde_json::from_str(
            r#"{"title":"Tarefa 1","creationDate":"2020-01-01T00:00:00Z","id":99}"#,
        )
        .unwrap();
        assert_eq!(draft, TaskDraft::new("Tarefa 1"));
    }

    #[test]
    fn draft_validation() {
        assert!(TaskDraft::new("Tarefa 1").validate().is_ok());
        assert!(TaskDraft::new("ab").validate().is_err());
        assert!(TaskDraft::new("    ").validate().is_err());
    }
}
