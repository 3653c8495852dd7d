use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book_edition::{self, BookEdition};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub publisher: String,
    pub published_year: Option<i32>,
    /// Together with `edition_isbn` this is the natural key; neither changes after insert.
    pub batch_number: String,
    pub edition_isbn: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book_edition::Entity",
        from = "Column::EditionIsbn",
        to = "super::book_edition::Column::Isbn"
    )]
    BookEdition,
}

impl Related<super::book_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookEdition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A printing batch of an edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[schema(example = "Schamberger-Huels")]
    pub publisher: String,
    #[schema(example = 2002)]
    pub published_year: Option<i32>,
    #[schema(example = "34-820-4567")]
    pub batch_number: String,
    pub edition: BookEdition,
}

impl Book {
    pub fn from_parts(model: Model, edition: book_edition::Model) -> Self {
        Self {
            id: Some(model.id),
            publisher: model.publisher,
            published_year: model.published_year,
            batch_number: model.batch_number,
            edition: BookEdition::from(edition),
        }
    }
}

impl From<Book> for ActiveModel {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.map_or(NotSet, Set),
            publisher: Set(book.publisher),
            published_year: Set(book.published_year),
            batch_number: Set(book.batch_number),
            edition_isbn: Set(book.edition.isbn),
        }
    }
}

/// Only the ISBN of an edition, used where the edition is a lookup key.
///
/// Extra edition fields in a payload are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct EditionKey {
    #[schema(example = "1-23-456789-2")]
    pub isbn: String,
}

/// Merge-patch for a book. `batch_number` and `edition` only locate the row.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    #[schema(example = "34-820-4567")]
    pub batch_number: String,
    pub edition: EditionKey,
}

impl BookPatch {
    /// Overlays publisher and published year onto `book`.
    pub fn merge_into(self, book: &mut Book) {
        if let Some(publisher) = self.publisher {
            book.publisher = publisher;
        }
        if let Some(year) = self.published_year {
            book.published_year = Some(year);
        }
    }
}
