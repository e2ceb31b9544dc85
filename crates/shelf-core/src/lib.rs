pub mod error;
pub use error::{CoreError, ErrorKind};
pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};
pub mod repository;
pub use repository::{Entity, MemoryStore, Repository, Slice};
pub mod lifecycle;
pub mod listing;
pub use listing::Listing;
pub mod service;
pub use service::{BookService, TaskService};
