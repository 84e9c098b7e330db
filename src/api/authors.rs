//! Author and book-author association handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use super::error_response;
use crate::services::book_service::{self, BookAuthorInput, CreateAuthorInput};

pub async fn create_author(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CreateAuthorInput>,
) -> impl IntoResponse {
    match book_service::create_author(&db, input).await {
        Ok(author) => (StatusCode::CREATED, Json(author)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_authors(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::list_authors(&db).await {
        Ok(authors) => Json(authors).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match book_service::get_author(&db, &id).await {
        Ok(author) => Json(author).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn add_book_author(
    State(db): State<DatabaseConnection>,
    Json(input): Json<BookAuthorInput>,
) -> impl IntoResponse {
    match book_service::add_book_author(&db, input).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Author associated with book" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn remove_book_author(
    State(db): State<DatabaseConnection>,
    Path((book_id, author_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match book_service::remove_book_author(&db, &book_id, &author_id).await {
        Ok(()) => Json(json!({ "message": "Association removed" })).into_response(),
        Err(e) => error_response(e),
    }
}
