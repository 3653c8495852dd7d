use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_editions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub isbn: String,
    pub title: String,
    pub author_name: String,
    pub number: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Books,
    #[sea_orm(has_many = "super::defect_edition::Entity")]
    DefectEditions,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl Related<super::defect_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefectEditions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A distinct title/author/number combination identified by its ISBN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookEdition {
    #[schema(example = "1-23-456789-2")]
    pub isbn: String,
    #[schema(example = "Java, Beginner's Guide 2")]
    pub title: String,
    #[schema(example = "Kellsie Havock")]
    pub author_name: String,
    #[schema(example = 2)]
    pub number: Option<i32>,
}

impl From<Model> for BookEdition {
    fn from(model: Model) -> Self {
        Self {
            isbn: model.isbn,
            title: model.title,
            author_name: model.author_name,
            number: model.number,
        }
    }
}

impl From<BookEdition> for ActiveModel {
    fn from(edition: BookEdition) -> Self {
        Self {
            isbn: Set(edition.isbn),
            title: Set(edition.title),
            author_name: Set(edition.author_name),
            number: Set(edition.number),
        }
    }
}

/// Merge-patch for an edition. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookEditionPatch {
    #[schema(example = "1-23-456789-2")]
    pub isbn: String,
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub number: Option<i32>,
}

impl BookEditionPatch {
    /// Overlays the supplied fields onto `edition`. The ISBN is never touched.
    pub fn merge_into(self, edition: &mut BookEdition) {
        if let Some(title) = self.title {
            edition.title = title;
        }
        if let Some(author_name) = self.author_name {
            edition.author_name = author_name;
        }
        if let Some(number) = self.number {
            edition.number = Some(number);
        }
    }
}
