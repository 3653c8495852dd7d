//! Application state containing services and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookEditionRepository, BookRepository, DefectEditionRepository};
use crate::infrastructure::{
    SeaOrmBookEditionRepository, SeaOrmBookRepository, SeaOrmDefectEditionRepository,
};
use crate::services::{BookEditionService, BookService, DefectEditionService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (health checks)
    db: DatabaseConnection,
    pub edition_service: BookEditionService,
    pub book_service: BookService,
    pub defect_service: DefectEditionService,
}

impl AppState {
    /// Wire repositories into services. Nothing is swapped after construction.
    pub fn new(db: DatabaseConnection) -> Self {
        let edition_repo: Arc<dyn BookEditionRepository> =
            Arc::new(SeaOrmBookEditionRepository::new(db.clone()));
        let book_repo: Arc<dyn BookRepository> = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let defect_repo: Arc<dyn DefectEditionRepository> =
            Arc::new(SeaOrmDefectEditionRepository::new(db.clone()));

        Self {
            db,
            edition_service: BookEditionService::new(edition_repo.clone()),
            book_service: BookService::new(book_repo.clone(), edition_repo),
            defect_service: DefectEditionService::new(defect_repo, book_repo),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
