//! SeaORM implementation of DefectEditionRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;

use crate::domain::{DefectEditionRepository, DomainError};
use crate::models::affected_batch::{self, Entity as AffectedBatchEntity};
use crate::models::book_edition::{self, Entity as EditionEntity};
use crate::models::defect_edition::{ActiveModel, Column, Entity as DefectEntity, Model};
use crate::models::{BookEdition, DefectEdition};

/// SeaORM-based implementation of DefectEditionRepository
pub struct SeaOrmDefectEditionRepository {
    db: DatabaseConnection,
}

impl SeaOrmDefectEditionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn assemble(
    defect: Model,
    edition: Option<book_edition::Model>,
    affected_batches: Vec<String>,
) -> Result<DefectEdition, DomainError> {
    let edition = edition.ok_or_else(|| {
        DomainError::Integrity(format!(
            "defect {} references missing edition {}",
            defect.defect_code, defect.edition_isbn
        ))
    })?;

    Ok(DefectEdition {
        defect_code: defect.defect_code,
        edition: BookEdition::from(edition),
        affected_batches,
    })
}

#[async_trait]
impl DefectEditionRepository for SeaOrmDefectEditionRepository {
    async fn find_all(&self) -> Result<Vec<DefectEdition>, DomainError> {
        let defects = DefectEntity::find()
            .find_also_related(EditionEntity)
            .order_by_asc(Column::DefectCode)
            .all(&self.db)
            .await?;

        let rows = AffectedBatchEntity::find()
            .order_by_asc(affected_batch::Column::DefectCode)
            .order_by_asc(affected_batch::Column::Position)
            .all(&self.db)
            .await?;

        let mut batches: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            batches
                .entry(row.defect_code)
                .or_default()
                .push(row.batch_number);
        }

        defects
            .into_iter()
            .map(|(defect, edition)| {
                let affected = batches.remove(&defect.defect_code).unwrap_or_default();
                assemble(defect, edition, affected)
            })
            .collect()
    }

    async fn find_by_code(&self, defect_code: &str) -> Result<Option<DefectEdition>, DomainError> {
        let Some((defect, edition)) = DefectEntity::find_by_id(defect_code.to_string())
            .find_also_related(EditionEntity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let affected = AffectedBatchEntity::find()
            .filter(affected_batch::Column::DefectCode.eq(defect_code))
            .order_by_asc(affected_batch::Column::Position)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.batch_number)
            .collect();

        assemble(defect, edition, affected).map(Some)
    }

    async fn create(&self, defect: DefectEdition) -> Result<DefectEdition, DomainError> {
        let txn = self.db.begin().await?;

        ActiveModel {
            defect_code: Set(defect.defect_code.clone()),
            edition_isbn: Set(defect.edition.isbn.clone()),
        }
        .insert(&txn)
        .await?;

        for (position, batch_number) in defect.affected_batches.iter().enumerate() {
            affected_batch::ActiveModel {
                defect_code: Set(defect.defect_code.clone()),
                position: Set(position as i32),
                batch_number: Set(batch_number.clone()),
                edition_isbn: Set(defect.edition.isbn.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(defect)
    }
}
