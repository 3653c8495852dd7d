//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{BookRepository, CreateBookInput, DomainError, EditionBinding};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};
use crate::models::affected_batch::{self, Entity as AffectedBatchEntity};
use crate::models::book_edition::{self, Entity as EditionEntity};
use crate::models::{Book, BookEdition};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// The edition FK is NOT NULL, so a missing edition means the schema was bypassed.
fn with_edition(row: (Model, Option<book_edition::Model>)) -> Result<Book, DomainError> {
    match row {
        (model, Some(edition)) => Ok(Book::from_parts(model, edition)),
        (model, None) => Err(DomainError::Integrity(format!(
            "book {} references missing edition {}",
            model.batch_number, model.edition_isbn
        ))),
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let rows = BookEntity::find()
            .find_also_related(EditionEntity)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter().map(with_edition).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        BookEntity::find_by_id(id)
            .find_also_related(EditionEntity)
            .one(&self.db)
            .await?
            .map(with_edition)
            .transpose()
    }

    async fn find_by_batch_number_and_isbn(
        &self,
        batch_number: &str,
        isbn: &str,
    ) -> Result<Option<Book>, DomainError> {
        BookEntity::find()
            .filter(Column::BatchNumber.eq(batch_number))
            .filter(Column::EditionIsbn.eq(isbn))
            .find_also_related(EditionEntity)
            .one(&self.db)
            .await?
            .map(with_edition)
            .transpose()
    }

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;

        let edition = match input.edition {
            EditionBinding::Existing(edition) => edition,
            EditionBinding::New(edition) => {
                // Another create may have stored this ISBN since the caller looked.
                let isbn = edition.isbn.clone();
                let inserted = EditionEntity::insert(book_edition::ActiveModel::from(edition))
                    .on_conflict(
                        OnConflict::column(book_edition::Column::Isbn)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(&txn)
                    .await?;

                let stored = EditionEntity::find_by_id(isbn.clone())
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        DomainError::Integrity(format!("edition {} vanished during insert", isbn))
                    })?;
                if inserted > 0 {
                    tracing::info!("Created book edition {} alongside book", stored.isbn);
                }
                BookEdition::from(stored)
            }
        };

        let new_book = ActiveModel {
            id: NotSet,
            publisher: Set(input.publisher),
            published_year: Set(input.published_year),
            batch_number: Set(input.batch_number),
            edition_isbn: Set(edition.isbn.clone()),
        };
        let model = new_book.insert(&txn).await?;

        txn.commit().await?;

        Ok(Book {
            id: Some(model.id),
            publisher: model.publisher,
            published_year: model.published_year,
            batch_number: model.batch_number,
            edition,
        })
    }

    async fn update(&self, book: Book) -> Result<Book, DomainError> {
        let id = book
            .id
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        // Natural key columns are left untouched.
        let mut active: ActiveModel = existing.into();
        active.publisher = Set(book.publisher.clone());
        active.published_year = Set(book.published_year);

        let model = active.update(&self.db).await?;

        Ok(Book {
            publisher: model.publisher,
            published_year: model.published_year,
            ..book
        })
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let book = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        let mut defect_codes: Vec<String> = AffectedBatchEntity::find()
            .filter(affected_batch::Column::BatchNumber.eq(book.batch_number.as_str()))
            .filter(affected_batch::Column::EditionIsbn.eq(book.edition_isbn.as_str()))
            .order_by_asc(affected_batch::Column::DefectCode)
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.defect_code)
            .collect();
        defect_codes.dedup();

        let still_listed = |codes: String| {
            DomainError::Conflict(format!(
                "batch {} of ISBN {} is referenced by defect(s) {}",
                book.batch_number, book.edition_isbn, codes
            ))
        };
        if !defect_codes.is_empty() {
            return Err(still_listed(defect_codes.join(", ")));
        }

        // A defect committed after the check above is caught by the affected_batches FK.
        BookEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| match DomainError::from(e) {
                DomainError::Integrity(_) => still_listed("recorded concurrently".to_string()),
                other => other,
            })?;

        txn.commit().await?;
        Ok(())
    }
}
