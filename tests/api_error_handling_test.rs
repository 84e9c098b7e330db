use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::util::ServiceExt; // for `oneshot`

use bookstore::db;
use bookstore::infrastructure::AppState;
use bookstore::server;

// Helper to build an app over a fresh in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router_with_state(AppState::new(db))
}

fn json_request(method: &str, uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_book_malformed_id_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(get_request("/api/books/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_book_not_found() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(get_request(
            "/api/books/7f000000-0000-4000-8000-000000000000",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_validation_failure() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({ "title": "", "author": "Someone" });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = serde_json::json!({
        "title": "Valid",
        "author": "Someone",
        "publicationYear": -1
    });
    let response = app
        .oneshot(json_request("POST", "/api/books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_and_delete_missing_book_not_found() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({ "title": "Renamed" });
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/api/books/7f000000-0000-4000-8000-000000000000",
            &payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = Request::builder()
        .uri("/api/books/7f000000-0000-4000-8000-000000000000")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_crud_over_http() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({
        "title": "1984",
        "author": "G. Orwell",
        "publicationYear": 1949
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/books", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "1984");

    // Case-insensitive title filter
    let response = app
        .clone()
        .oneshot(get_request("/api/books?title=1984"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let books = body_json(response).await;
    assert_eq!(books.as_array().unwrap().len(), 1);

    // Partial update leaves omitted fields alone
    let patch = serde_json::json!({ "isbn": "978-0451524935" });
    let response = app
        .clone()
        .oneshot(json_request("PATCH", &format!("/api/books/{}", id), &patch))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["isbn"], "978-0451524935");
    assert_eq!(updated["title"], "1984");
    assert_eq!(updated["publicationYear"], 1949);

    let req = Request::builder()
        .uri(format!("/api/books/{}", id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!("/api/books/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_association_endpoints() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/books",
            &serde_json::json!({ "title": "1984", "author": "G. Orwell" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let book_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/books/authors",
            &serde_json::json!({ "firstName": "George", "lastName": "Orwell" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let author_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let assoc = serde_json::json!({
        "bookId": book_id,
        "authorId": author_id,
        "role": "Primary"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/books/book-author", &assoc))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Duplicate pair violates the uniqueness constraint
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/books/book-author", &assoc))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The book now exposes exactly one author entry with role Primary
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/books/{}", book_id)))
        .await
        .unwrap();
    let book = body_json(response).await;
    let authors = book["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["role"], "Primary");
    assert_eq!(authors[0]["firstName"], "George");

    // Removing a missing association is a 404; removing the real one works
    let req = Request::builder()
        .uri(format!(
            "/api/books/{}/authors/7f000000-0000-4000-8000-000000000000",
            book_id
        ))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = Request::builder()
        .uri(format!("/api/books/{}/authors/{}", book_id, author_id))
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Author still exists on its own
    let response = app
        .oneshot(get_request(&format!("/api/books/authors/{}", author_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_review_endpoints() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/books",
            &serde_json::json!({ "title": "Reviewed", "author": "Someone" }),
        ))
        .await
        .unwrap();
    let book_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Out-of-range ratings rejected
    for rating in [0, 6] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/books/{}/reviews", book_id),
                &serde_json::json!({ "reviewerName": "Reader", "rating": rating }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/books/{}/reviews", book_id),
            &serde_json::json!({ "reviewerName": "Reader", "rating": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_request(&format!("/api/books/{}/reviews", book_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let reviews = body_json(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
}
