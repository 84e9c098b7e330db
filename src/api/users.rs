//! User API handlers using the repository pattern

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::domain::{DomainError, NewUser};
use crate::infrastructure::AppState;

fn validate_new_user(input: &NewUser) -> Result<(), DomainError> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(DomainError::Validation("Name and email are required".into()));
    }
    Ok(())
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> impl IntoResponse {
    if let Err(e) = validate_new_user(&input) {
        return error_response(e);
    }

    match state.user_repo.create(input).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.user_repo.find_all().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => error_response(e),
    }
}

// Bulk creation is all-or-nothing: one invalid entry leaves zero rows
// committed
pub async fn create_users_bulk(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<NewUser>>,
) -> impl IntoResponse {
    for input in &inputs {
        if let Err(e) = validate_new_user(input) {
            return error_response(e);
        }
    }

    match state.user_repo.create_many(inputs).await {
        Ok(users) => {
            let total = users.len();
            (
                StatusCode::CREATED,
                Json(json!({ "users": users, "total": total })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.user_repo.search(&query.q).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => error_response(e),
    }
}
