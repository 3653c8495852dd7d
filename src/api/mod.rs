pub mod book_editions;
pub mod books;
pub mod defects;
pub mod error;
pub mod health;
pub mod validation;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Book editions
        .route(
            "/v1/book-editions",
            get(book_editions::list_editions)
                .post(book_editions::create_edition)
                .patch(book_editions::update_edition),
        )
        .route(
            "/v1/book-editions/:isbn",
            get(book_editions::get_edition).delete(book_editions::delete_edition),
        )
        // Books
        .route(
            "/v1/books",
            get(books::list_books)
                .post(books::create_book)
                .patch(books::update_book),
        )
        .route(
            "/v1/books/:batch_number/:isbn",
            get(books::get_book).delete(books::delete_book),
        )
        // Defects
        .route(
            "/v1/book-defects",
            get(defects::list_defects).post(defects::create_defect),
        )
        .route("/v1/book-defects/:defect_code", get(defects::get_defect))
        .with_state(state)
}
