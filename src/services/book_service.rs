//! Book Service - printing batches and their natural key (batch number, edition ISBN)

use std::sync::Arc;

use crate::domain::{
    BookEditionRepository, BookRepository, CreateBookInput, DomainError, EditionBinding,
};
use crate::models::{Book, BookPatch};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
    editions: Arc<dyn BookEditionRepository>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        editions: Arc<dyn BookEditionRepository>,
    ) -> Self {
        Self { books, editions }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        self.books.find_by_id(id).await
    }

    pub async fn find_by_batch_number_and_isbn(
        &self,
        batch_number: &str,
        isbn: &str,
    ) -> Result<Option<Book>, DomainError> {
        self.books
            .find_by_batch_number_and_isbn(batch_number, isbn)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        self.books.find_all().await
    }

    /// Store a new book.
    ///
    /// The edition is matched by ISBN only: a stored edition wins over whatever
    /// title/author the request carried, and an unknown ISBN creates the edition
    /// in the same transaction as the book.
    pub async fn create(&self, book: Book) -> Result<Book, DomainError> {
        let edition = match self.editions.find_by_isbn(&book.edition.isbn).await? {
            Some(stored) => {
                if stored != book.edition {
                    tracing::debug!(
                        "Book {} submitted edition fields differ from stored edition {}; using stored",
                        book.batch_number,
                        stored.isbn
                    );
                }
                EditionBinding::Existing(stored)
            }
            None => EditionBinding::New(book.edition),
        };

        let isbn = &edition.edition().isbn;
        if self
            .books
            .find_by_batch_number_and_isbn(&book.batch_number, isbn)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "book with batch number {} and ISBN {} already exists",
                book.batch_number, isbn
            )));
        }

        let created = self
            .books
            .create(CreateBookInput {
                publisher: book.publisher,
                published_year: book.published_year,
                batch_number: book.batch_number,
                edition,
            })
            .await?;

        tracing::info!(
            "Created book {} for edition {}",
            created.batch_number,
            created.edition.isbn
        );
        Ok(created)
    }

    /// Apply a merge-patch to the book located by the patch's batch number and ISBN.
    pub async fn update(&self, patch: BookPatch) -> Result<Book, DomainError> {
        let mut book = self
            .books
            .find_by_batch_number_and_isbn(&patch.batch_number, &patch.edition.isbn)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        patch.merge_into(&mut book);

        self.books.update(book).await
    }

    /// Delete a book by natural key. Batches still listed by a defect are kept.
    pub async fn delete(&self, batch_number: &str, isbn: &str) -> Result<(), DomainError> {
        let book = self
            .books
            .find_by_batch_number_and_isbn(batch_number, isbn)
            .await?
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;

        let id = book
            .id
            .ok_or_else(|| DomainError::NotFound("Book not found".to_string()))?;
        self.books.delete(id).await?;

        tracing::info!("Deleted book {} of edition {}", batch_number, isbn);
        Ok(())
    }
}
