//! Resource services: the operations the boundary layer calls.
//!
//! Collaborators are passed in by constructor; services hold no other state.

mod task;
pub use task::TaskService;

mod book;
pub use book::BookService;
