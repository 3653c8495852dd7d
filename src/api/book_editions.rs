//! Book edition API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::error::{ApiError, ApiResult};
use super::validation::{not_blank, not_blank_if_present, positive, positive_if_present};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{BookEdition, BookEditionPatch};

/// Field rules shared by edition payloads, including editions nested in a book.
pub(crate) fn validate_edition(edition: &BookEdition) -> Result<(), ApiError> {
    not_blank("isbn", &edition.isbn)?;
    not_blank("title", &edition.title)?;
    not_blank("authorName", &edition.author_name)?;
    positive("number", edition.number)
}

#[utoipa::path(
    get,
    path = "/api/v1/book-editions",
    tag = "Book Edition Management",
    responses(
        (status = 200, description = "Book editions retrieved successfully", body = [BookEdition])
    )
)]
pub async fn list_editions(State(state): State<AppState>) -> ApiResult<Json<Vec<BookEdition>>> {
    Ok(Json(state.edition_service.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/book-editions/{isbn}",
    tag = "Book Edition Management",
    params(("isbn" = String, Path, description = "Edition ISBN")),
    responses(
        (status = 200, description = "Book edition found successfully", body = BookEdition),
        (status = 404, description = "Book edition not found", body = super::error::ErrorResponse)
    )
)]
pub async fn get_edition(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookEdition>> {
    state
        .edition_service
        .find_by_isbn(&isbn)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::NotFound("Book Edition not found".to_string()).into())
}

#[utoipa::path(
    post,
    path = "/api/v1/book-editions",
    tag = "Book Edition Management",
    request_body = BookEdition,
    responses(
        (status = 201, description = "Book edition created successfully", body = BookEdition),
        (status = 400, description = "Invalid request data or edition already exists", body = super::error::ErrorResponse)
    )
)]
pub async fn create_edition(
    State(state): State<AppState>,
    Json(payload): Json<BookEdition>,
) -> ApiResult<(StatusCode, Json<BookEdition>)> {
    validate_edition(&payload)?;

    let created = state.edition_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/book-editions",
    tag = "Book Edition Management",
    request_body = BookEditionPatch,
    responses(
        (status = 200, description = "Book edition updated successfully", body = BookEdition),
        (status = 400, description = "Invalid request data", body = super::error::ErrorResponse),
        (status = 404, description = "Book edition not found", body = super::error::ErrorResponse)
    )
)]
pub async fn update_edition(
    State(state): State<AppState>,
    Json(patch): Json<BookEditionPatch>,
) -> ApiResult<Json<BookEdition>> {
    not_blank("isbn", &patch.isbn)?;
    not_blank_if_present("title", patch.title.as_deref())?;
    not_blank_if_present("authorName", patch.author_name.as_deref())?;
    positive_if_present("number", patch.number)?;

    Ok(Json(state.edition_service.update(patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/book-editions/{isbn}",
    tag = "Book Edition Management",
    params(("isbn" = String, Path, description = "Edition ISBN")),
    responses(
        (status = 204, description = "Book edition deleted successfully"),
        (status = 404, description = "Book edition not found", body = super::error::ErrorResponse)
    )
)]
pub async fn delete_edition(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<StatusCode> {
    state.edition_service.delete_by_isbn(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}
