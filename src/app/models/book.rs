//! Book records.

use super::form::{FormError, FormField, FormSnapshot, FormState};
use super::resource::{RecordId, Resource, ResourceKind};
use crate::app::views::list_renderer::Card;
use serde::{Deserialize, Serialize};

pub const YEAR_MIN: i64 = 1000;
pub const YEAR_MAX: i64 = 2100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl Book {
    pub fn status_label(&self) -> &'static str {
        if self.available {
            "✅ Available"
        } else {
            "❌ Not Available"
        }
    }

    fn form(title: &str) -> FormState {
        FormState::new(
            title,
            vec![
                FormField::text("title", "Title"),
                FormField::text("author", "Author"),
                FormField::text("isbn", "ISBN"),
                FormField::integer("year", "Year", YEAR_MIN, Some(YEAR_MAX)),
                FormField::checkbox("available", "Available", true),
            ],
        )
    }
}

impl Resource for Book {
    const KIND: ResourceKind = ResourceKind::Book;

    type Fields = BookFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            year: self.year,
            available: self.available,
        }
    }

    fn card(&self) -> Card {
        Card::new(self.id.clone(), format!("{} {}", Self::KIND.icon(), self.title))
            .detail("Author", &self.author)
            .detail("ISBN", &self.isbn)
            .detail("Year", self.year.to_string())
            .detail("Status", self.status_label())
    }

    fn blank_form() -> FormState {
        Self::form("Add Book")
    }

    fn edit_form(&self) -> FormState {
        let mut form = Self::form("Edit Book");
        form.set_text("title", &self.title);
        form.set_text("author", &self.author);
        form.set_text("isbn", &self.isbn);
        form.set_text("year", self.year.to_string());
        form.set_flag("available", self.available);
        form
    }

    fn fields_from_snapshot(snapshot: &FormSnapshot) -> Result<BookFields, FormError> {
        snapshot.validate()?;
        let year = i32::try_from(snapshot.integer("year")?).map_err(|_| FormError::TooLarge {
            label: "Year".to_string(),
            max: YEAR_MAX,
        })?;
        Ok(BookFields {
            title: snapshot.text("title")?,
            author: snapshot.text("author")?,
            isbn: snapshot.text("isbn")?,
            year,
            available: snapshot.flag("available")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_available_should_default_to_true() {
        let book: Book = serde_json::from_value(json!({
            "id": "b1", "title": "Dune", "author": "Herbert", "isbn": "978-0441013593", "year": 1965
        }))
        .unwrap();
        assert!(book.available);
        assert_eq!(book.status_label(), "✅ Available");
    }

    #[test]
    fn card_should_show_status() {
        let book = Book {
            id: RecordId::assigned("b2"),
            title: "Emma".into(),
            author: "Austen".into(),
            isbn: "111".into(),
            year: 1815,
            available: false,
        };
        let card = book.card();
        assert_eq!(card.heading(), "📖 Emma");
        assert!(card
            .details()
            .iter()
            .any(|(label, value)| label == "Status" && value == "❌ Not Available"));
    }

    #[test]
    fn year_outside_range_should_fail_validation() {
        let mut form = Book::blank_form();
        form.set_text("title", "Future");
        form.set_text("author", "Someone");
        form.set_text("isbn", "1");
        form.set_text("year", "2500");

        let error = Book::fields_from_snapshot(&form.snapshot()).unwrap_err();
        assert_eq!(error.to_string(), "Year must be at most 2100.");
    }

    #[test]
    fn year_beyond_i32_should_be_rejected_not_truncated() {
        let mut form = Book::blank_form();
        form.set_text("title", "Far");
        form.set_text("author", "Someone");
        form.set_text("isbn", "1");
        form.set_text("year", "4294968261");

        let error = Book::fields_from_snapshot(&form.snapshot()).unwrap_err();
        assert_eq!(
            error,
            FormError::TooLarge {
                label: "Year".into(),
                max: YEAR_MAX
            }
        );
    }

    #[test]
    fn snapshot_should_build_fields() {
        let mut form = Book::blank_form();
        form.set_text("title", "Dune");
        form.set_text("author", "Herbert");
        form.set_text("isbn", "978-0441013593");
        form.set_text("year", "1965");
        form.set_flag("available", false);

        let fields = Book::fields_from_snapshot(&form.snapshot()).unwrap();
        assert_eq!(
            serde_json::to_value(fields).unwrap(),
            json!({"title": "Dune", "author": "Herbert", "isbn": "978-0441013593", "year": 1965, "available": false})
        );
    }
}
