//! Book aggregate API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::error_response;
use crate::domain::DomainError;
use crate::services::book_service::{
    self, BookDetailsInput, BookFilter, CreateBookInput, CreateReviewInput, UpdateBookPatch,
};

#[utoipa::path(
    post,
    path = "/api/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Validation failure")
    )
)]
pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CreateBookInput>,
) -> impl IntoResponse {
    match book_service::create_book(&db, input).await {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "Matching books with details and reviews")
    )
)]
pub async fn list_books(
    State(db): State<DatabaseConnection>,
    Query(filter): Query<BookFilter>,
) -> impl IntoResponse {
    match book_service::list_books(&db, filter).await {
        Ok(books) => Json(books).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    responses(
        (status = 200, description = "Book with details, reviews and authors"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    // Identifier syntax is checked before any store access
    if Uuid::parse_str(&id).is_err() {
        return error_response(DomainError::InvalidId(id));
    }

    match book_service::get_book(&db, &id).await {
        Ok(book) => Json(book).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    responses(
        (status = 200, description = "Updated book, associations reloaded"),
        (status = 404, description = "No such book")
    )
)]
pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateBookPatch>,
) -> impl IntoResponse {
    match book_service::update_book(&db, &id, patch).await {
        Ok(book) => Json(book).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    responses(
        (status = 200, description = "Book and dependent rows deleted"),
        (status = 404, description = "No such book")
    )
)]
pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match book_service::delete_book(&db, &id).await {
        Ok(()) => Json(serde_json::json!({ "message": "Book deleted successfully" }))
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_book_details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(input): Json<BookDetailsInput>,
) -> impl IntoResponse {
    match book_service::create_book_details(&db, &id, input).await {
        Ok(details) => (StatusCode::CREATED, Json(details)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_book_details(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match book_service::get_book_details(&db, &id).await {
        Ok(details) => Json(details).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_review(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(input): Json<CreateReviewInput>,
) -> impl IntoResponse {
    match book_service::create_review(&db, &id, input).await {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_book_reviews(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match book_service::list_book_reviews(&db, &id).await {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => error_response(e),
    }
}
