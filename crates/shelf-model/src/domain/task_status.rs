use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Lifecycle state of a task.
///
/// Any state may move to any other; the only side effect of a transition is
/// the conclusion stamp applied when a task enters [`TaskStatus::Done`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created and not started yet.
    #[default]
    #[serde(alias = "PENDENTE")]
    Pending,
    /// Work has started.
    #[serde(alias = "EM_ANDAMENTO")]
    InProgress,
    /// Work is finished.
    #[serde(alias = "CONCLUIDA")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    /// Returns `true` for [`TaskStatus::Done`].
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Wire token, as used in query strings and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase().replace('-', "_");
        match norm.as_str() {
            "PENDING" | "PENDENTE" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" | "INPROGRESS" | "EM_ANDAMENTO" => Ok(TaskStatus::InProgress),
            "DONE" | "CONCLUIDA" => Ok(TaskStatus::Done),
            _ => Err(ModelError::validation(
                "status",
                format!("'{s}' is not one of PENDING, IN_PROGRESS, DONE"),
            )),
        }
    }
}
