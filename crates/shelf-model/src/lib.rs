//! Domain types shared by the catalog and task-tracker services.
//!
//! Entities ([`Task`], [`Book`]) live in [`domain`]; the listing vocabulary
//! (query descriptor, page metadata, navigation links) lives in [`listing`].

mod error;
pub use error::ModelError;

pub mod domain;
pub use domain::*;

pub mod listing;
pub use listing::*;
