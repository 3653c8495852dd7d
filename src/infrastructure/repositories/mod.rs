//! Repository implementations using SeaORM

pub mod book_edition_repository;
pub mod book_repository;
pub mod defect_edition_repository;

pub use book_edition_repository::SeaOrmBookEditionRepository;
pub use book_repository::SeaOrmBookRepository;
pub use defect_edition_repository::SeaOrmDefectEditionRepository;
