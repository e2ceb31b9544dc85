mod task_status;
pub use task_status::TaskStatus;

mod task;
pub use task::{Task, TaskDraft};

mod book;
pub use book::{Book, BookDraft};

mod validate;

pub(crate) mod time_serde;

/// Identity assigned by the repository on first save.
///
/// Identities grow monotonically, so ascending id order equals creation order.
pub type EntityId = u64;

/// Inclusive length bounds for titles and authors.
pub const TEXT_MIN_LEN: usize = 3;
pub const TEXT_MAX_LEN: usize = 100;
