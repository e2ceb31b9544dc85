//! Listing vocabulary: query descriptor, page metadata and navigation links.

mod query;
pub use query::{
    DEFAULT_PAGE_SIZE, ListingFilter, ListingRequest, MAX_PAGE_SIZE, RawListing, SortDirection,
    SortField,
};

mod page;
pub use page::{Page, PageMeta};

mod links;
pub use links::{LinkRel, LinkSet};
