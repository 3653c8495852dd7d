use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book_edition::BookEdition;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "defect_editions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub defect_code: String,
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
    #[sea_orm(has_many = "super::affected_batch::Entity")]
    AffectedBatches,
}

impl Related<super::book_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookEdition.def()
    }
}

impl Related<super::affected_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffectedBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A quality issue tied to an edition and the batches it affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefectEdition {
    #[schema(example = "D-1")]
    pub defect_code: String,
    pub edition: BookEdition,
    #[schema(example = json!(["34-820-4567"]))]
    pub affected_batches: Vec<String>,
}

/// One entry of `affectedBatches` in a create request.
///
/// Clients may send either `"B-001"` or `{"affectedBatch": "B-001"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AffectedBatchInput {
    Plain(String),
    Tagged {
        #[serde(rename = "affectedBatch")]
        affected_batch: String,
    },
}

impl AffectedBatchInput {
    pub fn batch_number(&self) -> &str {
        match self {
            AffectedBatchInput::Plain(batch) => batch,
            AffectedBatchInput::Tagged { affected_batch } => affected_batch,
        }
    }

    pub fn into_batch_number(self) -> String {
        match self {
            AffectedBatchInput::Plain(batch) => batch,
            AffectedBatchInput::Tagged { affected_batch } => affected_batch,
        }
    }
}

/// Create request for a defect. The edition is referenced by ISBN only.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDefectEdition {
    #[schema(example = "D-1")]
    pub defect_code: String,
    #[schema(example = "1-23-456789-2")]
    pub edition_isbn: String,
    #[schema(value_type = Vec<String>, example = json!(["34-820-4567"]))]
    pub affected_batches: Vec<AffectedBatchInput>,
}

impl NewDefectEdition {
    /// Binds the request to a resolved edition.
    pub fn with_edition(self, edition: BookEdition) -> DefectEdition {
        DefectEdition {
            defect_code: self.defect_code,
            edition,
            affected_batches: self
                .affected_batches
                .into_iter()
                .map(AffectedBatchInput::into_batch_number)
                .collect(),
        }
    }
}
