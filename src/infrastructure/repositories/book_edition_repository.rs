//! SeaORM implementation of BookEditionRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{BookEditionRepository, DomainError, EditionCascade};
use crate::models::BookEdition;
use crate::models::affected_batch::{self, Entity as AffectedBatchEntity};
use crate::models::book::{self, Entity as BookEntity};
use crate::models::book_edition::{ActiveModel, Column, Entity as EditionEntity};
use crate::models::defect_edition::{self, Entity as DefectEntity};

/// SeaORM-based implementation of BookEditionRepository
pub struct SeaOrmBookEditionRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookEditionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookEditionRepository for SeaOrmBookEditionRepository {
    async fn find_all(&self) -> Result<Vec<BookEdition>, DomainError> {
        let editions = EditionEntity::find()
            .order_by_asc(Column::Isbn)
            .all(&self.db)
            .await?;

        Ok(editions.into_iter().map(BookEdition::from).collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookEdition>, DomainError> {
        let edition = EditionEntity::find_by_id(isbn.to_string())
            .one(&self.db)
            .await?;

        Ok(edition.map(BookEdition::from))
    }

    async fn create(&self, edition: BookEdition) -> Result<BookEdition, DomainError> {
        let model = ActiveModel::from(edition).insert(&self.db).await?;
        Ok(BookEdition::from(model))
    }

    async fn update(&self, edition: BookEdition) -> Result<BookEdition, DomainError> {
        let existing = EditionEntity::find_by_id(edition.isbn.clone())
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book Edition not found".to_string()))?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(edition.title);
        active.author_name = Set(edition.author_name);
        active.number = Set(edition.number);

        let model = active.update(&self.db).await?;
        Ok(BookEdition::from(model))
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<EditionCascade, DomainError> {
        let txn = self.db.begin().await?;

        if EditionEntity::find_by_id(isbn.to_string())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound("Book Edition not found".to_string()));
        }

        let defect_codes: Vec<String> = DefectEntity::find()
            .filter(defect_edition::Column::EditionIsbn.eq(isbn))
            .all(&txn)
            .await?
            .into_iter()
            .map(|d| d.defect_code)
            .collect();

        // Dependents go first: affected batches, defects, books, then the edition.
        AffectedBatchEntity::delete_many()
            .filter(
                Condition::any()
                    .add(affected_batch::Column::DefectCode.is_in(defect_codes))
                    .add(affected_batch::Column::EditionIsbn.eq(isbn)),
            )
            .exec(&txn)
            .await?;

        let defects = DefectEntity::delete_many()
            .filter(defect_edition::Column::EditionIsbn.eq(isbn))
            .exec(&txn)
            .await?
            .rows_affected;

        let books = BookEntity::delete_many()
            .filter(book::Column::EditionIsbn.eq(isbn))
            .exec(&txn)
            .await?
            .rows_affected;

        EditionEntity::delete_by_id(isbn.to_string())
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(EditionCascade { books, defects })
    }
}
