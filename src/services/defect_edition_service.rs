//! Defect Edition Service - defects are only stored when every listed batch exists

use std::sync::Arc;

use crate::domain::{BookRepository, DefectEditionRepository, DomainError};
use crate::models::DefectEdition;

#[derive(Clone)]
pub struct DefectEditionService {
    defects: Arc<dyn DefectEditionRepository>,
    books: Arc<dyn BookRepository>,
}

impl DefectEditionService {
    pub fn new(
        defects: Arc<dyn DefectEditionRepository>,
        books: Arc<dyn BookRepository>,
    ) -> Self {
        Self { defects, books }
    }

    pub async fn find_all(&self) -> Result<Vec<DefectEdition>, DomainError> {
        self.defects.find_all().await
    }

    pub async fn find_by_id(&self, defect_code: &str) -> Result<Option<DefectEdition>, DomainError> {
        self.defects.find_by_code(defect_code).await
    }

    /// Store a defect whose edition has already been resolved.
    ///
    /// Every affected batch must be a stored book of the defect's edition;
    /// the first one that is not aborts the create before anything is written.
    pub async fn create(&self, defect: DefectEdition) -> Result<DefectEdition, DomainError> {
        if defect.affected_batches.is_empty() {
            return Err(DomainError::Validation(
                "affectedBatches must not be empty".to_string(),
            ));
        }

        if self.defects.find_by_code(&defect.defect_code).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "Defect {} already exists",
                defect.defect_code
            )));
        }

        let isbn = &defect.edition.isbn;
        for batch_number in &defect.affected_batches {
            if self
                .books
                .find_by_batch_number_and_isbn(batch_number, isbn)
                .await?
                .is_none()
            {
                tracing::warn!(
                    "Rejected defect {}: batch {} not found for ISBN {}",
                    defect.defect_code,
                    batch_number,
                    isbn
                );
                return Err(DomainError::Validation(format!(
                    "No book found with batch number: {}, and ISBN: {}",
                    batch_number, isbn
                )));
            }
        }

        let created = self.defects.create(defect).await?;
        tracing::info!(
            "Recorded defect {} on edition {} ({} batch(es))",
            created.defect_code,
            created.edition.isbn,
            created.affected_batches.len()
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::init_db;
    use crate::domain::DomainError;
    use crate::infrastructure::AppState;
    use crate::models::{Book, BookEdition, DefectEdition};

    const ISBN: &str = "1-23-456789-2";

    fn guide() -> BookEdition {
        BookEdition {
            isbn: ISBN.to_string(),
            title: "Guide".to_string(),
            author_name: "A".to_string(),
            number: Some(1),
        }
    }

    fn defect(code: &str, batches: &[&str]) -> DefectEdition {
        DefectEdition {
            defect_code: code.to_string(),
            edition: guide(),
            affected_batches: batches.iter().map(|b| b.to_string()).collect(),
        }
    }

    // Edition "Guide" with batches B-001 and B-002
    async fn setup_test_state() -> AppState {
        let db = init_db("sqlite::memory:").await.expect("Failed to init DB");
        let state = AppState::new(db);

        state.edition_service.create(guide()).await.unwrap();
        for batch_number in ["B-001", "B-002"] {
            state
                .book_service
                .create(Book {
                    id: None,
                    publisher: "P".to_string(),
                    published_year: Some(2020),
                    batch_number: batch_number.to_string(),
                    edition: guide(),
                })
                .await
                .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let state = setup_test_state().await;

        let created = state
            .defect_service
            .create(defect("D-1", &["B-002", "B-001"]))
            .await
            .unwrap();
        assert_eq!(created.affected_batches, vec!["B-002", "B-001"]);

        let found = state.defect_service.find_by_id("D-1").await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(state.defect_service.find_all().await.unwrap(), vec![created]);
        assert!(state.defect_service.find_by_id("D-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_batch_persists_nothing() {
        let state = setup_test_state().await;
        state
            .defect_service
            .create(defect("D-1", &["B-001"]))
            .await
            .unwrap();

        let err = state
            .defect_service
            .create(defect("D-2", &["B-001", "B-999"]))
            .await
            .unwrap_err();

        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("B-999"));
                assert!(msg.contains(ISBN));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(state.defect_service.find_all().await.unwrap().len(), 1);
        assert!(state.defect_service.find_by_id("D-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_batch_of_other_edition_is_rejected() {
        let state = setup_test_state().await;
        let other = BookEdition {
            isbn: "9-87-654321-0".to_string(),
            ..guide()
        };
        state
            .book_service
            .create(Book {
                id: None,
                publisher: "P".to_string(),
                published_year: Some(2021),
                batch_number: "B-100".to_string(),
                edition: other,
            })
            .await
            .unwrap();

        let err = state
            .defect_service
            .create(defect("D-1", &["B-100"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(state.defect_service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_code_is_already_exists() {
        let state = setup_test_state().await;
        state
            .defect_service
            .create(defect("D-1", &["B-001"]))
            .await
            .unwrap();

        let err = state
            .defect_service
            .create(defect("D-1", &["B-002"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::AlreadyExists(_)));
        let stored = state.defect_service.find_by_id("D-1").await.unwrap().unwrap();
        assert_eq!(stored.affected_batches, vec!["B-001"]);
    }

    #[tokio::test]
    async fn test_empty_batch_list_is_rejected() {
        let state = setup_test_state().await;

        let err = state
            .defect_service
            .create(defect("D-1", &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }
}
