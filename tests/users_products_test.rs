use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use bookstore::db;
use bookstore::domain::{
    DomainError, NewProduct, NewUser, ProductPatch, ProductRepository, UserRepository,
};
use bookstore::infrastructure::{SeaOrmProductRepository, SeaOrmUserRepository};
use bookstore::models::user;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = setup_test_db().await;
    let repo = SeaOrmUserRepository::new(db);

    repo.create(new_user("Alice", "alice@example.com"))
        .await
        .unwrap();

    let err = repo
        .create(new_user("Other Alice", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn test_bulk_create_rolls_back_on_failure() {
    let db = setup_test_db().await;
    let repo = SeaOrmUserRepository::new(db.clone());

    // Second entry collides with the first inside the same batch
    let err = repo
        .create_many(vec![
            new_user("Alice", "alice@example.com"),
            new_user("Shadow Alice", "alice@example.com"),
            new_user("Bob", "bob@example.com"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // Zero rows committed
    let count = user::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_bulk_create_commits_all_on_success() {
    let db = setup_test_db().await;
    let repo = SeaOrmUserRepository::new(db.clone());

    let users = repo
        .create_many(vec![
            new_user("Alice", "alice@example.com"),
            new_user("Bob", "bob@example.com"),
        ])
        .await
        .unwrap();
    assert_eq!(users.len(), 2);

    let count = user::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_user_search_is_case_insensitive_over_name_and_email() {
    let db = setup_test_db().await;
    let repo = SeaOrmUserRepository::new(db);

    repo.create(new_user("Alice Johnson", "alice@example.com"))
        .await
        .unwrap();
    repo.create(new_user("Bob Smith", "bob@other.org"))
        .await
        .unwrap();

    let hits = repo.search("ALICE").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Alice Johnson");

    // Matches on email too
    let hits = repo.search("other.org").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Bob Smith");
}

#[tokio::test]
async fn test_product_lifecycle() {
    let db = setup_test_db().await;
    let repo = SeaOrmProductRepository::new(db);

    let product = repo
        .create(NewProduct {
            name: "Laptop".to_string(),
            description: None,
            price: 999.5,
            stock: None,
        })
        .await
        .unwrap();
    // Stock defaults to zero when omitted
    assert_eq!(product.stock, 0);

    let patch = ProductPatch {
        price: Some(899.0),
        stock: Some(5),
        ..Default::default()
    };
    let updated = repo.update(product.id, patch).await.unwrap();
    assert_eq!(updated.price, 899.0);
    assert_eq!(updated.stock, 5);
    assert_eq!(updated.name, "Laptop");

    repo.delete(product.id).await.unwrap();
    let err = repo.delete(product.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let missing = repo.find_by_id(product.id).await.unwrap();
    assert!(missing.is_none());
}
