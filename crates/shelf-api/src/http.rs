use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use shelf_core::{Entity, Listing};
use shelf_model::{BookDraft, EntityId, LinkRel, LinkSet, Page, RawListing, TaskDraft};
use tracing::debug;

use crate::{error::ApiError, handler::ApiHandler, links::LinkRenderer};

const TASKS_PATH: &str = "/api/v1/tasks";
const BOOKS_PATH: &str = "/api/v1/books";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    base_url: String,
}

struct HttpState<H> {
    handler: Arc<H>,
    links: LinkRenderer,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    ///
    /// Links are rendered host-relative until [`HttpApi::with_base_url`] is set.
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            base_url: String::new(),
        }
    }

    /// Public origin used when rendering navigation links.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /health - Liveness probe
    /// - GET /api/v1/tasks - List tasks (paged, sortable, filterable)
    /// - POST /api/v1/tasks - Create task
    /// - GET|PUT|DELETE /api/v1/tasks/{id} - Read, replace, delete task
    /// - GET /api/v1/books - List books (paged, sortable, title filter)
    /// - POST /api/v1/books - Create book
    /// - GET|PUT|DELETE /api/v1/books/{id} - Read, replace, delete book
    pub fn router(self) -> Router {
        let state = Arc::new(HttpState {
            handler: self.handler,
            links: LinkRenderer::new(self.base_url),
        });

        Router::new()
            .route("/health", get(health))
            .route(TASKS_PATH, get(list_tasks::<H>).post(create_task::<H>))
            .route(
                "/api/v1/tasks/{id}",
                get(get_task::<H>).put(update_task::<H>).delete(delete_task::<H>),
            )
            .route(BOOKS_PATH, get(list_books::<H>).post(create_book::<H>))
            .route(
                "/api/v1/books/{id}",
                get(get_book::<H>).put(update_book::<H>).delete(delete_book::<H>),
            )
            .fallback(unknown_route)
            .with_state(state)
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
struct LinkDto {
    href: String,
}

/// Present relations only, keyed by name (`self`, `first`, `next`, `previous`, `last`).
#[derive(Debug)]
struct CollectionLinks(Vec<(LinkRel, String)>);

impl CollectionLinks {
    fn render(renderer: &LinkRenderer, path: &str, links: &LinkSet) -> Self {
        Self(renderer.render(path, links))
    }
}

impl Serialize for CollectionLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, href) in &self.0 {
            map.serialize_entry(rel.as_str(), &LinkDto { href: href.clone() })?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct ItemLinks {
    #[serde(rename = "self")]
    current: LinkDto,
}

/// An entity with its own `self` link.
#[derive(Debug, Serialize)]
struct ItemResource<T> {
    #[serde(flatten)]
    item: T,
    #[serde(rename = "_links")]
    links: ItemLinks,
}

impl<T: Entity + Serialize> ItemResource<T> {
    fn new(renderer: &LinkRenderer, path: &str, item: T) -> Self {
        let href = match item.id() {
            Some(id) => renderer.item(path, id),
            None => format!("{}{}", renderer.base_url(), path),
        };
        Self {
            item,
            links: ItemLinks {
                current: LinkDto { href },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageDto {
    size: usize,
    number: usize,
    total_elements: usize,
    total_pages: usize,
}

#[derive(Debug, Serialize)]
struct CollectionResponse<T> {
    items: Vec<ItemResource<T>>,
    page: PageDto,
    #[serde(rename = "_links")]
    links: CollectionLinks,
}

impl<T: Entity + Serialize> CollectionResponse<T> {
    fn new(renderer: &LinkRenderer, path: &str, listing: Listing<T>) -> Self {
        let Listing { page, links } = listing;
        let Page {
            items,
            page_index,
            page_size,
            total_elements,
            total_pages,
        } = page;

        Self {
            items: items
                .into_iter()
                .map(|item| ItemResource::new(renderer, path, item))
                .collect(),
            page: PageDto {
                size: page_size,
                number: page_index,
                total_elements,
                total_pages,
            },
            links: CollectionLinks::render(renderer, path, &links),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

// ============================================================================
// Extraction helpers
// ============================================================================

fn parse_id(raw: &str) -> Result<EntityId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid id: '{raw}'")))
}

fn query_params(query: Result<Query<RawListing>, QueryRejection>) -> Result<RawListing, ApiError> {
    query
        .map(|Query(raw)| raw)
        .map_err(|e| ApiError::InvalidRequest(e.body_text()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::InvalidRequest(e.body_text()))
}

// ============================================================================
// Handlers
// ============================================================================

/// Any path without a route.
async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/v1/tasks
///
/// Query params (all optional):
/// - ?page=0          - zero-based page index (default 0)
/// - ?size=5          - page size (default 5, max 100)
/// - ?sort=title      - id | title, `title,desc` also accepted (default id)
/// - ?direction=desc  - asc | desc (default asc)
/// - ?title=Tarefa    - case-sensitive title fragment
/// - ?status=DONE     - PENDING | IN_PROGRESS | DONE (not combinable with title)
async fn list_tasks<H>(
    State(state): State<Arc<HttpState<H>>>,
    query: Result<Query<RawListing>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let raw = query_params(query)?;
    debug!(?raw, "listing tasks");
    let listing = state.handler.list_tasks(raw).await?;
    Ok(Json(CollectionResponse::new(&state.links, TASKS_PATH, listing)))
}

/// GET /api/v1/tasks/{id}
async fn get_task<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    debug!(id, "getting task");
    let task = state.handler.get_task(id).await?;
    Ok(Json(ItemResource::new(&state.links, TASKS_PATH, task)))
}

/// POST /api/v1/tasks
async fn create_task<H>(
    State(state): State<Arc<HttpState<H>>>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let draft = json_body(payload)?;
    debug!(title = %draft.title, "creating task");
    let task = state.handler.create_task(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResource::new(&state.links, TASKS_PATH, task)),
    ))
}

/// PUT /api/v1/tasks/{id}
async fn update_task<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    let draft = json_body(payload)?;
    debug!(id, status = ?draft.status, "updating task");
    let task = state.handler.update_task(id, draft).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ItemResource::new(&state.links, TASKS_PATH, task)),
    ))
}

/// DELETE /api/v1/tasks/{id}
async fn delete_task<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    state.handler.delete_task(id).await?;
    debug!(id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/books
///
/// Same paging and sort params as tasks; only the `title` filter applies.
async fn list_books<H>(
    State(state): State<Arc<HttpState<H>>>,
    query: Result<Query<RawListing>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let raw = query_params(query)?;
    debug!(?raw, "listing books");
    let listing = state.handler.list_books(raw).await?;
    Ok(Json(CollectionResponse::new(&state.links, BOOKS_PATH, listing)))
}

/// GET /api/v1/books/{id}
async fn get_book<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    let book = state.handler.get_book(id).await?;
    Ok(Json(ItemResource::new(&state.links, BOOKS_PATH, book)))
}

/// POST /api/v1/books
async fn create_book<H>(
    State(state): State<Arc<HttpState<H>>>,
    payload: Result<Json<BookDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let draft = json_body(payload)?;
    debug!(title = %draft.title, "creating book");
    let book = state.handler.create_book(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResource::new(&state.links, BOOKS_PATH, book)),
    ))
}

/// PUT /api/v1/books/{id}
async fn update_book<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
    payload: Result<Json<BookDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    let draft = json_body(payload)?;
    let book = state.handler.update_book(id, draft).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ItemResource::new(&state.links, BOOKS_PATH, book)),
    ))
}

/// DELETE /api/v1/books/{id}
async fn delete_book<H>(
    State(state): State<Arc<HttpState<H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let id = parse_id(&id)?;
    state.handler.delete_book(id).await?;
    debug!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
