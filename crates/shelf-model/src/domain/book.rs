use serde::{Deserialize, Serialize};

use super::{EntityId, validate};
use crate::ModelError;

/// A catalog entry. Titles are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub author: String,
    pub year_of_publication: i32,
}

/// Client-supplied fields for creating or replacing a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year_of_publication: i32,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year_of_publication: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year_of_publication,
        }
    }

    /// Validates the draft against the calendar year the request is served in.
    pub fn validate(&self, current_year: i32) -> Result<(), ModelError> {
        validate::required_text("title", &self.title)?;
        validate::required_text("author", &self.author)?;
        if self.year_of_publication > current_year {
            return Err(ModelError::Validation {
                field: "yearOfPublication",
                message: format!(
                    "{} is in the future (current year is {current_year})",
                    self.year_of_publication
                ),
            });
        }
        Ok(())
    }

    pub fn into_book(self) -> Book {
        Book {
            id: None,
            title: self.title,
            author: self.author,
            year_of_publication: self.year_of_publication,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_current_and_past_years() {
        assert!(BookDraft::new("Dom Casmurro", "Machado de Assis", 1899).validate(2026).is_ok());
        assert!(BookDraft::new("New Release", "Some Author", 2026).validate(2026).is_ok());
    }

    #[test]
    fn rejects_future_year() {
        let err = BookDraft::new("New Release", "Some Author", 2027)
            .validate(2026)
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::Validation {
                field: "yearOfPublication",
                ..
            }
        ));
    }

    #[test]
    fn rejects_short_author() {
        let err = BookDraft::new("Dom Casmurro", "MA", 1899).validate(2026).unwrap_err();
        assert!(matches!(err, ModelError::Validation { field: "author", .. }));
    }

    #[test]
    fn missing_year_fails_to_deserialize() {
        let res: Result<BookDraft, _> =
            serde_json::from_str(r#"{"title":"Dom Casmurro","author":"Machado de Assis"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn into_book_has_no_identity() {
        let book = BookDraft::new("Dom Casmurro", "Machado de Assis", 1899).into_book();
        assert!(book.id.is_none());
        assert_eq!(book.year_of_publication, 1899);
    }
}
