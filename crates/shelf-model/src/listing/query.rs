use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::{ModelError, TaskStatus};

/// Page size used when the caller omits `size` or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: usize = 5;
/// Upper bound applied to caller-supplied page sizes.
pub const MAX_PAGE_SIZE: usize = 100;

/// Field a listing is ordered by.
///
/// Defaults to [`SortField::Id`]: ids are assigned monotonically, so the default
/// order is creation order and stays stable across pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Id,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
        }
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            _ => Err(ModelError::Validation {
                field: "sort",
                message: format!("'{s}' is not a sortable field (valid: id, title)"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending order; anything else, including
    /// absence, selects ascending.
    pub fn lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Restriction applied to a listing. At most one filter is active per request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingFilter {
    /// Case-sensitive substring match on the title.
    TitleContains(String),
    /// Exact match on the task status.
    Status(TaskStatus),
}

impl ListingFilter {
    /// Query parameter name and value this filter is carried in.
    pub fn as_param(&self) -> (&'static str, String) {
        match self {
            ListingFilter::TitleContains(fragment) => ("title", fragment.clone()),
            ListingFilter::Status(status) => ("status", status.as_str().to_string()),
        }
    }
}

impl fmt::Display for ListingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, value) = self.as_param();
        write!(f, "{name}={value}")
    }
}

/// Listing parameters exactly as received from the boundary, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawListing {
    /// Zero-based page index.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size: Option<i64>,
    /// Sort field; `field,direction` is also accepted.
    pub sort: Option<String>,
    pub direction: Option<String>,
    /// Title substring filter.
    pub title: Option<String>,
    /// Status filter token.
    pub status: Option<String>,
}

/// `?size=` counts as absent; non-numeric text is still an error.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got '{value}'"))),
    }
}

impl RawListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Canonical, normalized listing descriptor.
///
/// Invariants: `page_size >= 1`; `page_index` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingRequest {
    pub page_index: usize,
    pub page_size: usize,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub filter: Option<ListingFilter>,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingRequest {
    pub fn new() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            filter: None,
        }
    }

    /// Normalizes raw boundary input.
    ///
    /// Paging values never fail: a negative page becomes 0 and a non-positive
    /// size becomes [`DEFAULT_PAGE_SIZE`]. An unknown sort field is a validation
    /// error; any filter problem is an [`ModelError::InvalidFilter`].
    pub fn build(raw: &RawListing) -> Result<Self, ModelError> {
        let page_index = match raw.page {
            Some(p) if p > 0 => usize::try_from(p).unwrap_or(usize::MAX),
            _ => 0,
        };

        let page_size = match raw.size {
            Some(s) if s > 0 => usize::try_from(s).map_or(MAX_PAGE_SIZE, |s| s.min(MAX_PAGE_SIZE)),
            _ => DEFAULT_PAGE_SIZE,
        };

        let (sort_field, inline_direction) = match raw.sort.as_deref().map(str::trim) {
            None | Some("") => (SortField::default(), None),
            Some(sort) => match sort.split_once(',') {
                Some((field, direction)) => (field.parse()?, Some(direction)),
                None => (sort.parse()?, None),
            },
        };
        let sort_direction = SortDirection::lenient(raw.direction.as_deref().or(inline_direction));

        let filter = build_filter(raw.title.as_deref(), raw.status.as_deref())?;

        Ok(Self {
            page_index,
            page_size,
            sort_field,
            sort_direction,
            filter,
        })
    }

    pub fn with_page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn with_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub fn with_filter(mut self, filter: ListingFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Number of matching records that precede this page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Same descriptor pointing at another page; sort and filter are preserved.
    pub fn at_page(&self, page_index: usize) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }
}

fn build_filter(
    title: Option<&str>,
    status: Option<&str>,
) -> Result<Option<ListingFilter>, ModelError> {
    match (title, status) {
        (None, None) => Ok(None),
        (Some(_), Some(_)) => Err(ModelError::InvalidFilter(
            "title and status filters cannot be combined".into(),
        )),
        (Some(title), None) => {
            if title.trim().is_empty() {
                return Err(ModelError::InvalidFilter("title filter cannot be empty".into()));
            }
            Ok(Some(ListingFilter::TitleContains(title.to_string())))
        }
        (None, Some(token)) => token
            .parse::<TaskStatus>()
            .map(|status| Some(ListingFilter::Status(status)))
            .map_err(|_| {
                ModelError::InvalidFilter(format!(
                    "invalid status: '{token}' (valid: PENDING, IN_PROGRESS, DONE)"
                ))
            }),
    }
}
