//! Services Layer
//!
//! Business rules for editions, books and defects. Each service receives its
//! repositories at construction and is called from the Axum handlers.

pub mod book_edition_service;
pub mod book_service;
pub mod defect_edition_service;

pub use book_edition_service::BookEditionService;
pub use book_service::BookService;
pub use defect_edition_service::DefectEditionService;
