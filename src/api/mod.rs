pub mod authors;
pub mod books;
pub mod health;
pub mod products;
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(db: sea_orm::DatabaseConnection) -> Router {
    api_router_with_state(AppState::new(db))
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Authors (static segments must be registered alongside /books/:id)
        .route("/books/authors", post(authors::create_author))
        .route("/books/authors", get(authors::list_authors))
        .route("/books/authors/:id", get(authors::get_author))
        .route("/books/book-author", post(authors::add_book_author))
        .route(
            "/books/:id/authors/:author_id",
            delete(authors::remove_book_author),
        )
        // Books
        .route("/books", post(books::create_book))
        .route("/books", get(books::list_books))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/details", post(books::create_book_details))
        .route("/books/:id/details", get(books::get_book_details))
        .route("/books/:id/reviews", post(books::create_review))
        .route("/books/:id/reviews", get(books::list_book_reviews))
        // Users
        .route("/user", post(users::create_user))
        .route("/user", get(users::list_users))
        .route("/user/bulk", post(users::create_users_bulk))
        .route("/user/search", get(users::search_users))
        // Products
        .route("/products", post(products::create_product))
        .route("/products", get(products::list_products))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .with_state(state)
}

/// Map a domain error to its HTTP response. No error is retried; every
/// failure surfaces directly to the caller.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
