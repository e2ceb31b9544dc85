//! Process-wide logging setup on top of `tracing-subscriber`.

mod logger;
pub use logger::*;
