//! Product API handlers using the repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error_response;
use crate::domain::{DomainError, NewProduct, ProductPatch};
use crate::infrastructure::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> impl IntoResponse {
    if input.price < 0.0 || input.stock.is_some_and(|s| s < 0) {
        return error_response(DomainError::Validation(
            "Price and stock must be non-negative".into(),
        ));
    }

    match state.product_repo.create(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    match state.product_repo.find_all().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.product_repo.find_by_id(id).await {
        Ok(Some(product)) => Json(product).into_response(),
        Ok(None) => error_response(DomainError::NotFound("Product".to_string())),
        Err(e) => error_response(e),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<ProductPatch>,
) -> impl IntoResponse {
    if patch.price.is_some_and(|p| p < 0.0) || patch.stock.is_some_and(|s| s < 0) {
        return error_response(DomainError::Validation(
            "Price and stock must be non-negative".into(),
        ));
    }

    match state.product_repo.update(id, patch).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.product_repo.delete(id).await {
        Ok(()) => Json(json!({ "message": "Product deleted" })).into_response(),
        Err(e) => error_response(e),
    }
}
