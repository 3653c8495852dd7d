//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Book, BookEdition, DefectEdition};

/// Rows removed by an edition delete
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditionCascade {
    pub books: u64,
    pub defects: u64,
}

/// Repository trait for BookEdition entity
#[async_trait]
pub trait BookEditionRepository: Send + Sync {
    /// Find all editions
    async fn find_all(&self) -> Result<Vec<BookEdition>, DomainError>;

    /// Find an edition by ISBN
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookEdition>, DomainError>;

    /// Insert a new edition
    async fn create(&self, edition: BookEdition) -> Result<BookEdition, DomainError>;

    /// Overwrite the stored fields of an existing edition, keyed by ISBN
    async fn update(&self, edition: BookEdition) -> Result<BookEdition, DomainError>;

    /// Delete an edition together with its books and defects in one transaction
    async fn delete_by_isbn(&self, isbn: &str) -> Result<EditionCascade, DomainError>;
}

/// How a new book is tied to its edition
#[derive(Debug, Clone)]
pub enum EditionBinding {
    /// The edition is already stored
    Existing(BookEdition),
    /// The edition was not stored when looked up; insert it with the book unless it appeared since
    New(BookEdition),
}

impl EditionBinding {
    pub fn edition(&self) -> &BookEdition {
        match self {
            EditionBinding::Existing(edition) | EditionBinding::New(edition) => edition,
        }
    }
}

/// Input for creating a book
#[derive(Debug, Clone)]
pub struct CreateBookInput {
    pub publisher: String,
    pub published_year: Option<i32>,
    pub batch_number: String,
    pub edition: EditionBinding,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books with their editions
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a book by generated ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Find a book by its natural key
    async fn find_by_batch_number_and_isbn(
        &self,
        batch_number: &str,
        isbn: &str,
    ) -> Result<Option<Book>, DomainError>;

    /// Insert a book, and its edition when it is new, in one transaction
    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError>;

    /// Persist publisher and published year of a stored book
    async fn update(&self, book: Book) -> Result<Book, DomainError>;

    /// Delete a book by ID, refusing with Conflict while a defect still lists its batch
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for DefectEdition entity
#[async_trait]
pub trait DefectEditionRepository: Send + Sync {
    /// Find all defects with their editions and affected batches
    async fn find_all(&self) -> Result<Vec<DefectEdition>, DomainError>;

    /// Find a defect by its code
    async fn find_by_code(&self, defect_code: &str) -> Result<Option<DefectEdition>, DomainError>;

    /// Insert a defect and its affected batches in one transaction
    async fn create(&self, defect: DefectEdition) -> Result<DefectEdition, DomainError>;
}
