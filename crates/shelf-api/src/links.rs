use shelf_model::{LinkRel, LinkSet, ListingRequest};
use url::form_urlencoded;

/// Turns listing descriptors into absolute URLs.
///
/// Every parameter that shaped the page (paging, sort, filter) is written
/// back into the query string, so following a link reproduces the listing.
#[derive(Debug, Clone)]
pub struct LinkRenderer {
    base_url: String,
}

impl LinkRenderer {
    /// `base_url` is the public origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single resource, e.g. `<base>/api/v1/tasks/3`.
    pub fn item(&self, path: &str, id: impl std::fmt::Display) -> String {
        format!("{}{}/{}", self.base_url, path, id)
    }

    pub fn href(&self, path: &str, target: &ListingRequest) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("page", &target.page_index.to_string())
            .append_pair("size", &target.page_size.to_string())
            .append_pair("sort", target.sort_field.as_str())
            .append_pair("direction", target.sort_direction.as_str());
        if let Some(filter) = &target.filter {
            let (name, value) = filter.as_param();
            query.append_pair(name, &value);
        }
        format!("{}{}?{}", self.base_url, path, query.finish())
    }

    /// Present relations with their rendered URLs, in `self, first, next, previous, last` order.
    pub fn render(&self, path: &str, links: &LinkSet) -> Vec<(LinkRel, String)> {
        links
            .iter()
            .map(|(rel, target)| (rel, self.href(path, target)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_model::{ListingFilter, PageMeta, SortDirection, SortField, TaskStatus};

    const TASKS: &str = "/api/v1/tasks";

    #[test]
    fn trailing_slash_is_trimmed() {
        let renderer = LinkRenderer::new("http://localhost:8080/");
        assert_eq!(renderer.base_url(), "http://localhost:8080");
        assert_eq!(renderer.item(TASKS, 3), "http://localhost:8080/api/v1/tasks/3");
    }

    #[test]
    fn href_carries_paging_and_sort() {
        let renderer = LinkRenderer::new("http://localhost:8080");
        let req = ListingRequest::new()
            .with_size(10)
            .with_sort(SortField::Title, SortDirection::Desc)
            .with_page(2);
        assert_eq!(
            renderer.href(TASKS, &req),
            "http://localhost:8080/api/v1/tasks?page=2&size=10&sort=title&direction=desc"
        );
    }

    #[test]
    fn href_encodes_title_filter() {
        let renderer = LinkRenderer::new("");
        let req = ListingRequest::new().with_filter(ListingFilter::TitleContains("Tarefa & co".into()));
        assert_eq!(
            renderer.href(TASKS, &req),
            "/api/v1/tasks?page=0&size=5&sort=id&direction=asc&title=Tarefa+%26+co"
        );
    }

    #[test]
    fn href_carries_status_filter() {
        let renderer = LinkRenderer::new("");
        let req = ListingRequest::new().with_filter(ListingFilter::Status(TaskStatus::InProgress));
        assert!(renderer.href(TASKS, &req).ends_with("&status=IN_PROGRESS"));
    }

    #[test]
    fn render_keeps_filter_on_every_relation() {
        let renderer = LinkRenderer::new("");
        let req = ListingRequest::new()
            .with_filter(ListingFilter::TitleContains("Tarefa".into()))
            .with_page(1);
        let links = LinkSet::assemble(&req, &PageMeta::compute(&req, 12));

        let rendered = renderer.render(TASKS, &links);
        let rels: Vec<_> = rendered.iter().map(|(rel, _)| rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "first", "next", "previous", "last"]);
        assert!(rendered.iter().all(|(_, href)| href.contains("title=Tarefa")));
    }
}
