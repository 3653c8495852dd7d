use crate::api;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::book_editions::list_editions,
        api::book_editions::get_edition,
        api::book_editions::create_edition,
        api::book_editions::update_edition,
        api::book_editions::delete_edition,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::defects::list_defects,
        api::defects::get_defect,
        api::defects::create_defect,
    ),
    components(
        schemas(
            models::BookEdition,
            models::BookEditionPatch,
            models::Book,
            models::BookPatch,
            models::EditionKey,
            models::DefectEdition,
            models::NewDefectEdition,
            api::error::ErrorResponse,
        )
    ),
    tags(
        (name = "Book Edition Management", description = "APIs for managing book editions"),
        (name = "Book Management", description = "APIs for managing books"),
        (name = "Book Defect Management", description = "APIs for managing book defects")
    )
)]
pub struct ApiDoc;
