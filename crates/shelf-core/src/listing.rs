use shelf_model::{LinkSet, ListingRequest, Page, PageMeta, RawListing};
use tracing::debug;

use crate::{
    error::CoreError,
    repository::{Entity, Repository},
};

/// One served page together with its navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<E> {
    pub page: Page<E>,
    pub links: LinkSet,
}

/// Lists `E` records according to raw boundary input.
///
/// Stateless: the descriptor, metadata and links are re-derived on every call.
/// Repository failures are returned unchanged; nothing is retried.
pub fn list<E, R>(repo: &R, raw: &RawListing) -> Result<Listing<E>, CoreError>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    let request = ListingRequest::build(raw)?;

    if let Some(filter) = &request.filter
        && !E::supports(filter)
    {
        return Err(CoreError::InvalidFilter(format!(
            "{} listings cannot be filtered by {}",
            E::RESOURCE,
            filter.as_param().0
        )));
    }

    let slice = repo.find_page(&request)?;
    let meta = PageMeta::compute(&request, slice.total);
    let links = LinkSet::assemble(&request, &meta);

    debug!(
        resource = E::RESOURCE,
        page = request.page_index,
        size = request.page_size,
        count = slice.items.len(),
        total = slice.total,
        "listing served"
    );

    Ok(Listing {
        page: Page::new(&request, slice.items, slice.total, &meta),
        links,
    })
}
