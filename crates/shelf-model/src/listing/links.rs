use std::fmt;

use super::{ListingRequest, PageMeta};

/// Navigation relation of a collection link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRel {
    /// The page that was just served.
    Current,
    First,
    Next,
    Previous,
    Last,
}

impl LinkRel {
    pub const ALL: [LinkRel; 5] = [
        LinkRel::Current,
        LinkRel::First,
        LinkRel::Next,
        LinkRel::Previous,
        LinkRel::Last,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRel::Current => "self",
            LinkRel::First => "first",
            LinkRel::Next => "next",
            LinkRel::Previous => "previous",
            LinkRel::Last => "last",
        }
    }
}

impl fmt::Display for LinkRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation targets for one served page.
///
/// Targets are descriptors, not URLs. Each one is the originating request with
/// only the page index changed, so sort and filter always carry over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSet {
    current: ListingRequest,
    first: ListingRequest,
    next: Option<ListingRequest>,
    previous: Option<ListingRequest>,
    last: ListingRequest,
}

impl LinkSet {
    pub fn assemble(request: &ListingRequest, meta: &PageMeta) -> Self {
        Self {
            current: request.clone(),
            first: request.at_page(0),
            next: meta
                .has_next
                .then(|| request.at_page(request.page_index + 1)),
            // past the end, step back onto the last real page
            previous: meta.has_previous.then(|| {
                request.at_page((request.page_index - 1).min(meta.last_index()))
            }),
            last: request.at_page(meta.last_index()),
        }
    }

    /// The request that produced the page.
    pub fn current(&self) -> &ListingRequest {
        &self.current
    }

    pub fn first(&self) -> &ListingRequest {
        &self.first
    }

    pub fn next(&self) -> Option<&ListingRequest> {
        self.next.as_ref()
    }

    pub fn previous(&self) -> Option<&ListingRequest> {
        self.previous.as_ref()
    }

    pub fn last(&self) -> &ListingRequest {
        &self.last
    }

    pub fn get(&self, rel: LinkRel) -> Option<&ListingRequest> {
        match rel {
            LinkRel::Current => Some(self.current()),
            LinkRel::First => Some(self.first()),
            LinkRel::Next => self.next(),
            LinkRel::Previous => self.previous(),
            LinkRel::Last => Some(self.last()),
        }
    }

    pub fn contains(&self, rel: LinkRel) -> bool {
        self.get(rel).is_some()
    }

    /// Present relations in `self, first, next, previous, last` order.
    pub fn iter(&self) -> impl Iterator<Item = (LinkRel, &ListingRequest)> + '_ {
        LinkRel::ALL
            .into_iter()
            .filter_map(|rel| self.get(rel).map(|target| (rel, target)))
    }
}
