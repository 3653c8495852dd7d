//! Book Edition Service - edition lookups, creation, merge-patch and cascading delete

use std::sync::Arc;

use crate::domain::{BookEditionRepository, DomainError};
use crate::models::{BookEdition, BookEditionPatch};

#[derive(Clone)]
pub struct BookEditionService {
    editions: Arc<dyn BookEditionRepository>,
}

impl BookEditionService {
    pub fn new(editions: Arc<dyn BookEditionRepository>) -> Self {
        Self { editions }
    }

    pub async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookEdition>, DomainError> {
        self.editions.find_by_isbn(isbn).await
    }

    pub async fn find_all(&self) -> Result<Vec<BookEdition>, DomainError> {
        self.editions.find_all().await
    }

    /// Store a new edition. Fails with `AlreadyExists` when the ISBN is taken.
    pub async fn create(&self, edition: BookEdition) -> Result<BookEdition, DomainError> {
        if self.editions.find_by_isbn(&edition.isbn).await?.is_some() {
            tracing::warn!("Book edition {} already exists", edition.isbn);
            return Err(DomainError::AlreadyExists(
                "Book Edition already exists".to_string(),
            ));
        }

        let created = self.editions.create(edition).await?;
        tracing::info!("Created book edition {}", created.isbn);
        Ok(created)
    }

    /// Apply a merge-patch to the edition identified by `patch.isbn`.
    pub async fn update(&self, patch: BookEditionPatch) -> Result<BookEdition, DomainError> {
        let mut edition = self
            .editions
            .find_by_isbn(&patch.isbn)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book Edition not found".to_string()))?;

        patch.merge_into(&mut edition);

        self.editions.update(edition).await
    }

    /// Delete an edition, its books and the defects recorded against it.
    pub async fn delete_by_isbn(&self, isbn: &str) -> Result<(), DomainError> {
        if self.editions.find_by_isbn(isbn).await?.is_none() {
            return Err(DomainError::NotFound("Book Edition not found".to_string()));
        }

        let removed = self.editions.delete_by_isbn(isbn).await?;
        tracing::info!(
            "Deleted book edition {} with {} book(s) and {} defect(s)",
            isbn,
            removed.books,
            removed.defects
        );
        Ok(())
    }
}
