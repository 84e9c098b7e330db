//! Demo data seeding
//!
//! Each stage returns the ids it created and the next stage takes them as
//! arguments, so nothing is shared through ambient state.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

use crate::models::{author, book, book_author, book_details, product, review, user};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    seed_users(db).await?;
    seed_products(db).await?;

    let book_ids = seed_books(db).await?;
    seed_book_details(db, &book_ids).await?;

    let author_ids = seed_authors(db).await?;
    seed_book_authors(db, &book_ids, &author_ids).await?;
    seed_reviews(db, &book_ids).await?;

    Ok(())
}

async fn seed_users(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut ids = Vec::new();

    for (name, email) in [
        ("Alice Johnson", "alice@example.com"),
        ("Bob Smith", "bob@example.com"),
        ("Charlie Brown", "charlie@example.com"),
    ] {
        let user = user::ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        ids.push(user.insert(db).await?.id);
    }

    Ok(ids)
}

async fn seed_products(db: &DatabaseConnection) -> Result<Vec<i32>, DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut ids = Vec::new();

    for (name, description, price, stock) in [
        ("Laptop", "15-inch developer laptop", 1299.99, 10),
        ("Headphones", "Noise-cancelling over-ear", 199.99, 25),
        ("Desk Lamp", "Adjustable LED lamp", 39.99, 40),
    ] {
        let product = product::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(Some(description.to_owned())),
            price: Set(price),
            stock: Set(stock),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        ids.push(product.insert(db).await?.id);
    }

    Ok(ids)
}

async fn seed_books(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut ids = Vec::new();

    for (title, author_name, description, year, isbn) in [
        (
            "1984",
            "George Orwell",
            "A dystopian novel of surveillance and control.",
            1949,
            "978-0451524935",
        ),
        (
            "Brave New World",
            "Aldous Huxley",
            "A futuristic society engineered for stability.",
            1932,
            "978-0060850524",
        ),
        (
            "Fahrenheit 451",
            "Ray Bradbury",
            "Firemen burn books in a world without them.",
            1953,
            "978-1451673319",
        ),
    ] {
        let id = Uuid::new_v4().to_string();
        let book = book::ActiveModel {
            id: Set(id.clone()),
            title: Set(title.to_owned()),
            author: Set(author_name.to_owned()),
            description: Set(Some(description.to_owned())),
            publication_year: Set(Some(year)),
            isbn: Set(Some(isbn.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        book.insert(db).await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn seed_book_details(db: &DatabaseConnection, book_ids: &[String]) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    for (book_id, page_count, publisher) in [
        (&book_ids[0], 328, "Secker & Warburg"),
        (&book_ids[1], 311, "Chatto & Windus"),
        (&book_ids[2], 256, "Ballantine Books"),
    ] {
        let details = book_details::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            page_count: Set(Some(page_count)),
            language: Set(Some("English".to_owned())),
            publisher: Set(Some(publisher.to_owned())),
            edition: Set(Some("First".to_owned())),
            book_id: Set(book_id.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        details.insert(db).await?;
    }

    Ok(())
}

async fn seed_authors(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut ids = Vec::new();

    for (first, last, birth) in [
        ("George", "Orwell", "1903-06-25"),
        ("Aldous", "Huxley", "1894-07-26"),
        ("Ray", "Bradbury", "1920-08-22"),
    ] {
        let id = Uuid::new_v4().to_string();
        let author = author::ActiveModel {
            id: Set(id.clone()),
            first_name: Set(first.to_owned()),
            last_name: Set(last.to_owned()),
            birth_date: Set(Some(birth.to_owned())),
            biography: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        author.insert(db).await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn seed_book_authors(
    db: &DatabaseConnection,
    book_ids: &[String],
    author_ids: &[String],
) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    for (book_id, author_id) in book_ids.iter().zip(author_ids) {
        let assoc = book_author::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            book_id: Set(book_id.clone()),
            author_id: Set(author_id.clone()),
            role: Set(Some("Primary".to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        assoc.insert(db).await?;
    }

    Ok(())
}

async fn seed_reviews(db: &DatabaseConnection, book_ids: &[String]) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    for (book_id, reviewer, rating, comment) in [
        (&book_ids[0], "Alice", 5, "Chilling and unforgettable."),
        (&book_ids[0], "Bob", 4, "Bleak but brilliant."),
        (&book_ids[1], "Charlie", 4, "Still feels ahead of its time."),
        (&book_ids[2], "Alice", 5, "A love letter to books."),
    ] {
        let item = review::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            reviewer_name: Set(reviewer.to_owned()),
            rating: Set(rating),
            comment: Set(Some(comment.to_owned())),
            book_id: Set(book_id.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        item.insert(db).await?;
    }

    Ok(())
}
