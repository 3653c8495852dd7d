//! Book (printing batch) API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::book_editions::validate_edition;
use super::error::ApiResult;
use super::validation::{not_blank, not_blank_if_present, positive, positive_if_present};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{Book, BookPatch};

#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "Book Management",
    responses(
        (status = 200, description = "Books retrieved successfully", body = [Book])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.book_service.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{batch_number}/{isbn}",
    tag = "Book Management",
    params(
        ("batch_number" = String, Path, description = "Batch number"),
        ("isbn" = String, Path, description = "Edition ISBN")
    ),
    responses(
        (status = 200, description = "Book found successfully", body = Book),
        (status = 404, description = "Book not found", body = super::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path((batch_number, isbn)): Path<(String, String)>,
) -> ApiResult<Json<Book>> {
    state
        .book_service
        .find_by_batch_number_and_isbn(&batch_number, &isbn)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::NotFound("Book not found".to_string()).into())
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "Book Management",
    request_body = Book,
    responses(
        (status = 201, description = "Book created successfully", body = Book),
        (status = 400, description = "Invalid request data", body = super::error::ErrorResponse),
        (status = 409, description = "Batch already exists for this edition", body = super::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<Book>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    not_blank("publisher", &payload.publisher)?;
    positive("publishedYear", payload.published_year)?;
    not_blank("batchNumber", &payload.batch_number)?;
    validate_edition(&payload.edition)?;

    // Identity is assigned by the store
    let book = Book { id: None, ..payload };

    let created = state.book_service.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/books",
    tag = "Book Management",
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 400, description = "Invalid request data", body = super::error::ErrorResponse),
        (status = 404, description = "Book not found", body = super::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Json(patch): Json<BookPatch>,
) -> ApiResult<Json<Book>> {
    not_blank("batchNumber", &patch.batch_number)?;
    not_blank("edition.isbn", &patch.edition.isbn)?;
    not_blank_if_present("publisher", patch.publisher.as_deref())?;
    positive_if_present("publishedYear", patch.published_year)?;

    Ok(Json(state.book_service.update(patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{batch_number}/{isbn}",
    tag = "Book Management",
    params(
        ("batch_number" = String, Path, description = "Batch number"),
        ("isbn" = String, Path, description = "Edition ISBN")
    ),
    responses(
        (status = 204, description = "Book deleted successfully"),
        (status = 404, description = "Book not found", body = super::error::ErrorResponse),
        (status = 409, description = "Batch is still listed by a defect", body = super::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path((batch_number, isbn)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.book_service.delete(&batch_number, &isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
