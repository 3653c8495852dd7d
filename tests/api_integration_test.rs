use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use books_manager::{db, server};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to build the full application on an in-memory database
async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router(db, &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn edition_json(isbn: &str, title: &str) -> Value {
    json!({
        "isbn": isbn,
        "title": title,
        "authorName": "Ann Author",
        "number": 1
    })
}

fn book_json(batch: &str, edition: Value) -> Value {
    json!({
        "publisher": "Pub House",
        "publishedYear": 2021,
        "batchNumber": batch,
        "edition": edition
    })
}

async fn seed_book(app: &Router, batch: &str, isbn: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/books",
        Some(book_json(batch, edition_json(isbn, "Rust in Print"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_defect_lifecycle_happy_path() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;
    seed_book(&app, "B-002", "978-1").await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/book-defects",
        Some(json!({
            "defectCode": "D-1",
            "editionIsbn": "978-1",
            "affectedBatches": ["B-001", {"affectedBatch": "B-002"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["defectCode"], "D-1");
    assert_eq!(created["edition"]["isbn"], "978-1");
    assert_eq!(created["affectedBatches"], json!(["B-001", "B-002"]));

    let (status, fetched) = send(&app, "GET", "/api/v1/book-defects/D-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, all) = send(&app, "GET", "/api/v1/book-defects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_defect_with_unknown_batch_is_rejected_without_writes() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/book-defects",
        Some(json!({
            "defectCode": "D-2",
            "editionIsbn": "978-1",
            "affectedBatches": ["B-001", "B-999"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "No book found with batch number: B-999, and ISBN: 978-1"
    );

    let (_, all) = send(&app, "GET", "/api/v1/book-defects", None).await;
    assert!(all.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "GET", "/api/v1/book-defects/D-2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_defect_for_unknown_edition_is_rejected() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/book-defects",
        Some(json!({
            "defectCode": "D-3",
            "editionIsbn": "000-0",
            "affectedBatches": ["B-001"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No book edition found with ISBN: 000-0");
}

#[tokio::test]
async fn test_book_create_reuses_stored_edition() {
    let app = setup_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/book-editions",
        Some(edition_json("978-1", "Original Title")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, book) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(book_json("B-001", edition_json("978-1", "Different Title"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(book["id"].as_i64().is_some());
    assert_eq!(book["edition"]["title"], "Original Title");

    let (_, edition) = send(&app, "GET", "/api/v1/book-editions/978-1", None).await;
    assert_eq!(edition["title"], "Original Title");
}

#[tokio::test]
async fn test_book_create_with_new_isbn_creates_edition() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-9").await;

    let (status, edition) = send(&app, "GET", "/api/v1/book-editions/978-9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edition["title"], "Rust in Print");

    let (status, book) = send(&app, "GET", "/api/v1/books/B-001/978-9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["publisher"], "Pub House");
}

#[tokio::test]
async fn test_duplicate_book_is_a_conflict() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(book_json("B-001", edition_json("978-1", "Rust in Print"))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("B-001"));

    let (_, all) = send(&app, "GET", "/api/v1/books", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_edition_is_rejected() {
    let app = setup_app().await;
    let payload = edition_json("978-1", "First");

    let (status, _) = send(&app, "POST", "/api/v1/book-editions", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/book-editions", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book Edition already exists");
}

#[tokio::test]
async fn test_edition_patch_only_touches_supplied_fields() {
    let app = setup_app().await;
    send(
        &app,
        "POST",
        "/api/v1/book-editions",
        Some(edition_json("978-1", "Old Title")),
    )
    .await;

    let (status, patched) = send(
        &app,
        "PATCH",
        "/api/v1/book-editions",
        Some(json!({"isbn": "978-1", "title": "New Title"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "New Title");
    assert_eq!(patched["authorName"], "Ann Author");
    assert_eq!(patched["number"], 1);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/v1/book-editions",
        Some(json!({"isbn": "missing", "title": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edition_delete_cascades() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;
    seed_book(&app, "B-002", "978-1").await;
    seed_book(&app, "B-001", "978-2").await;
    send(
        &app,
        "POST",
        "/api/v1/book-defects",
        Some(json!({
            "defectCode": "D-1",
            "editionIsbn": "978-1",
            "affectedBatches": ["B-001"]
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/api/v1/book-editions/978-1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/v1/book-editions/978-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, books) = send(&app, "GET", "/api/v1/books", None).await;
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["edition"]["isbn"], "978-2");

    let (_, defects) = send(&app, "GET", "/api/v1/book-defects", None).await;
    assert!(defects.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", "/api/v1/book-editions/978-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_patch_keeps_natural_key() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;

    let (status, patched) = send(
        &app,
        "PATCH",
        "/api/v1/books",
        Some(json!({
            "publishedYear": 2024,
            "batchNumber": "B-001",
            "edition": {"isbn": "978-1"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["publishedYear"], 2024);
    assert_eq!(patched["publisher"], "Pub House");

    // A different batch number addresses a different (missing) book
    let (status, body) = send(
        &app,
        "PATCH",
        "/api/v1/books",
        Some(json!({
            "publisher": "Other",
            "batchNumber": "B-777",
            "edition": {"isbn": "978-1"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");

    let (_, book) = send(&app, "GET", "/api/v1/books/B-001/978-1", None).await;
    assert_eq!(book["publisher"], "Pub House");
}

#[tokio::test]
async fn test_book_delete() {
    let app = setup_app().await;
    seed_book(&app, "B-001", "978-1").await;
    seed_book(&app, "B-002", "978-1").await;
    send(
        &app,
        "POST",
        "/api/v1/book-defects",
        Some(json!({
            "defectCode": "D-1",
            "editionIsbn": "978-1",
            "affectedBatches": ["B-002"]
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/api/v1/books/B-001/978-1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/v1/books/B-001/978-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still listed by D-1
    let (status, body) = send(&app, "DELETE", "/api/v1/books/B-002/978-1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("D-1"));
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_app().await;

    let (status, health) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], "ok");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/book-defects"].is_object());
}
