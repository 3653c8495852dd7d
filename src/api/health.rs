use axum::{Json, extract::State};
use sea_orm::{ConnectionTrait, Statement};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db();
    let database = match db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_owned(),
        ))
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "service": "books-manager",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
