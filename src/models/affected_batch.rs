use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affected_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub defect_code: String,
    /// Index in the defect's `affectedBatches` list
    #[sea_orm(primary_key, auto_increment = false)]
    pub position: i32,
    pub batch_number: String,
    pub edition_isbn: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::defect_edition::Entity",
        from = "Column::DefectCode",
        to = "super::defect_edition::Column::DefectCode"
    )]
    DefectEdition,
}

impl Related<super::defect_edition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefectEdition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
