//! Book defect API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use super::error::{ApiError, ApiResult};
use super::validation::not_blank;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{DefectEdition, NewDefectEdition};

#[utoipa::path(
    get,
    path = "/api/v1/book-defects",
    tag = "Book Defect Management",
    responses(
        (status = 200, description = "Defected books retrieved successfully", body = [DefectEdition])
    )
)]
pub async fn list_defects(State(state): State<AppState>) -> ApiResult<Json<Vec<DefectEdition>>> {
    Ok(Json(state.defect_service.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/book-defects/{defect_code}",
    tag = "Book Defect Management",
    params(("defect_code" = String, Path, description = "Defect code")),
    responses(
        (status = 200, description = "Defect found successfully", body = DefectEdition),
        (status = 404, description = "Defect not found", body = super::error::ErrorResponse)
    )
)]
pub async fn get_defect(
    State(state): State<AppState>,
    Path(defect_code): Path<String>,
) -> ApiResult<Json<DefectEdition>> {
    state
        .defect_service
        .find_by_id(&defect_code)
        .await?
        .map(Json)
        .ok_or_else(|| DomainError::NotFound("Defect not found".to_string()).into())
}

#[utoipa::path(
    post,
    path = "/api/v1/book-defects",
    tag = "Book Defect Management",
    request_body = NewDefectEdition,
    responses(
        (status = 200, description = "Book defect created successfully", body = DefectEdition),
        (status = 400, description = "Invalid request data or book edition not found", body = super::error::ErrorResponse)
    )
)]
pub async fn create_defect(
    State(state): State<AppState>,
    Json(payload): Json<NewDefectEdition>,
) -> ApiResult<Json<DefectEdition>> {
    not_blank("defectCode", &payload.defect_code)?;
    not_blank("editionIsbn", &payload.edition_isbn)?;
    if payload.affected_batches.is_empty() {
        return Err(ApiError::BadRequest(
            "affectedBatches must not be empty".to_string(),
        ));
    }
    for batch in &payload.affected_batches {
        not_blank("affectedBatches", batch.batch_number())?;
    }

    // The edition is resolved here; the service only sees a bound defect.
    let edition = state
        .edition_service
        .find_by_isbn(&payload.edition_isbn)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "No book edition found with ISBN: {}",
                payload.edition_isbn
            ))
        })?;

    let created = state
        .defect_service
        .create(payload.with_edition(edition))
        .await?;
    Ok(Json(created))
}
