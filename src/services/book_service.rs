//! Book Aggregate Service - Pure business logic without HTTP layer
//!
//! Single source of truth for reading and mutating a Book together with its
//! associated details, authors (via the book_authors join table), and
//! reviews. Shape validation runs before any store access; every mutation
//! that spans more than one table runs inside a single transaction.
#![allow(clippy::needless_update)] // SeaORM ActiveModels require ..Default::default()

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::models::author::{Author, Entity as AuthorEntity};
use crate::models::book::{
    ActiveModel as BookActiveModel, AssociatedAuthor, Book, Column as BookColumn,
    Entity as BookEntity,
};
use crate::models::book_author::{
    ActiveModel as BookAuthorActiveModel, Column as BookAuthorColumn, Entity as BookAuthorEntity,
};
use crate::models::book_details::{
    ActiveModel as DetailsActiveModel, BookDetails, Column as DetailsColumn,
    Entity as DetailsEntity,
};
use crate::models::review::{
    ActiveModel as ReviewActiveModel, Column as ReviewColumn, Entity as ReviewEntity, Review,
};
use crate::models::{book_author, book_details};

const MAX_TITLE_LEN: usize = 100;
const MAX_AUTHOR_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// Filter parameters for listing books
#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

/// Nested details payload on create/update
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailsInput {
    pub page_count: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
}

/// One author association entry: which author, in which role
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub author_id: String,
    pub role: Option<String>,
}

/// Input for creating a book, optionally with nested details and authors
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    pub details: Option<BookDetailsInput>,
    pub authors: Option<Vec<AuthorRef>>,
}

/// Partial update: absent fields are left unchanged. A present `authors`
/// list replaces the association set wholesale (empty list clears it).
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    pub details: Option<BookDetailsInput>,
    pub authors: Option<Vec<AuthorRef>>,
}

/// Input for creating an author
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub biography: Option<String>,
}

/// Input for associating an existing book with an existing author
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthorInput {
    pub book_id: String,
    pub author_id: String,
    pub role: Option<String>,
}

/// Input for creating a review on a book
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Author DTO including the books it is associated with
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<AssociatedBook>,
}

/// A book entry on an author, annotated with the association role
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub role: Option<String>,
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("Title cannot be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(
            "Title cannot be longer than 100 characters".into(),
        ));
    }
    Ok(())
}

fn validate_author(author: &str) -> Result<(), DomainError> {
    if author.trim().is_empty() {
        return Err(DomainError::Validation("Author cannot be empty".into()));
    }
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(DomainError::Validation(
            "Author cannot be longer than 100 characters".into(),
        ));
    }
    Ok(())
}

fn validate_optional_fields(
    description: Option<&str>,
    publication_year: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(description) = description
        && description.chars().count() > MAX_DESCRIPTION_LEN
    {
        return Err(DomainError::Validation(
            "Description cannot be longer than 5000 characters".into(),
        ));
    }
    if let Some(year) = publication_year
        && year < 0
    {
        return Err(DomainError::Validation(
            "Publication year must be a non-negative integer".into(),
        ));
    }
    Ok(())
}

/// Create a new book, optionally with nested details and author associations.
/// All inserts happen in one transaction.
pub async fn create_book(db: &DatabaseConnection, input: CreateBookInput) -> Result<Book, DomainError> {
    validate_title(&input.title)?;
    validate_author(&input.author)?;
    validate_optional_fields(input.description.as_deref(), input.publication_year)?;

    let now = chrono::Utc::now().to_rfc3339();
    let book_id = Uuid::new_v4().to_string();

    let txn = db.begin().await?;

    let new_book = BookActiveModel {
        id: Set(book_id.clone()),
        title: Set(input.title),
        author: Set(input.author),
        description: Set(input.description),
        publication_year: Set(input.publication_year),
        isbn: Set(input.isbn),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    new_book.insert(&txn).await?;

    if let Some(details) = input.details {
        insert_details(&txn, &book_id, details, &now).await?;
    }

    if let Some(authors) = input.authors {
        for entry in authors {
            ensure_author_exists(&txn, &entry.author_id).await?;
            insert_association(&txn, &book_id, &entry.author_id, entry.role, &now).await?;
        }
    }

    txn.commit().await?;

    tracing::info!(book_id = %book_id, "Book created");
    get_book(db, &book_id).await
}

/// List books matching the filter, with details and reviews eagerly loaded.
/// Authors are only loaded on the single-book path.
pub async fn list_books(db: &DatabaseConnection, filter: BookFilter) -> Result<Vec<Book>, DomainError> {
    let mut query = BookEntity::find();

    // LIKE is case-insensitive for ASCII on SQLite, which gives the
    // case-insensitive substring semantics of the title/author filters
    if let Some(title) = &filter.title
        && !title.is_empty()
    {
        query = query.filter(BookColumn::Title.contains(title));
    }

    if let Some(author) = &filter.author
        && !author.is_empty()
    {
        query = query.filter(BookColumn::Author.contains(author));
    }

    if let Some(year) = filter.publication_year {
        query = query.filter(BookColumn::PublicationYear.eq(year));
    }

    if let Some(isbn) = &filter.isbn
        && !isbn.is_empty()
    {
        query = query.filter(BookColumn::Isbn.eq(isbn));
    }

    let books = query.order_by_asc(BookColumn::CreatedAt).all(db).await?;

    let details = books.load_one(DetailsEntity, db).await?;
    let reviews = books.load_many(ReviewEntity, db).await?;

    let book_dtos = books
        .into_iter()
        .zip(details)
        .zip(reviews)
        .map(|((book, details), reviews)| {
            let mut dto = Book::from(book);
            dto.details = details.map(BookDetails::from);
            dto.reviews = Some(reviews.into_iter().map(Review::from).collect());
            dto
        })
        .collect();

    Ok(book_dtos)
}

/// Get a single book with details, reviews and role-annotated authors.
pub async fn get_book(db: &DatabaseConnection, id: &str) -> Result<Book, DomainError> {
    let book_model = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;

    let details = book_model.find_related(DetailsEntity).one(db).await?;
    let reviews = book_model.find_related(ReviewEntity).all(db).await?;

    let pairs = BookAuthorEntity::find()
        .filter(BookAuthorColumn::BookId.eq(id))
        .find_also_related(AuthorEntity)
        .all(db)
        .await?;

    let authors = pairs
        .into_iter()
        .filter_map(|(assoc, author)| {
            author.map(|author| AssociatedAuthor {
                author: Author::from(author),
                role: assoc.role,
            })
        })
        .collect();

    let mut dto = Book::from(book_model);
    dto.details = details.map(BookDetails::from);
    dto.reviews = Some(reviews.into_iter().map(Review::from).collect());
    dto.authors = Some(authors);
    Ok(dto)
}

/// Update a book: scalar fields, nested details, and the author-association
/// set, reconciled in one transaction.
pub async fn update_book(
    db: &DatabaseConnection,
    id: &str,
    patch: UpdateBookPatch,
) -> Result<Book, DomainError> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(author) = &patch.author {
        validate_author(author)?;
    }
    validate_optional_fields(patch.description.as_deref(), patch.publication_year)?;

    let book_model = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    // 1. Nested details: update in place, creating the row if the book has
    //    none yet (upsert semantics)
    if let Some(details_patch) = patch.details {
        let existing = DetailsEntity::find()
            .filter(DetailsColumn::BookId.eq(id))
            .one(&txn)
            .await?;

        match existing {
            Some(model) => {
                let mut details: DetailsActiveModel = model.into();
                if let Some(page_count) = details_patch.page_count {
                    details.page_count = Set(Some(page_count));
                }
                if let Some(language) = details_patch.language {
                    details.language = Set(Some(language));
                }
                if let Some(publisher) = details_patch.publisher {
                    details.publisher = Set(Some(publisher));
                }
                if let Some(edition) = details_patch.edition {
                    details.edition = Set(Some(edition));
                }
                details.updated_at = Set(now.clone());
                details.update(&txn).await?;
            }
            None => {
                insert_details(&txn, id, details_patch, &now).await?;
            }
        }
    }

    // 2. Author reconciliation: make the association set exactly match the
    //    provided list. An empty list removes every association.
    if let Some(authors) = patch.authors {
        let target: HashMap<&str, &Option<String>> = authors
            .iter()
            .map(|entry| (entry.author_id.as_str(), &entry.role))
            .collect();

        let existing = BookAuthorEntity::find()
            .filter(BookAuthorColumn::BookId.eq(id))
            .all(&txn)
            .await?;

        for assoc in &existing {
            if !target.contains_key(assoc.author_id.as_str()) {
                assoc.clone().delete(&txn).await?;
            }
        }

        let existing_by_author: HashMap<String, book_author::Model> = existing
            .into_iter()
            .map(|assoc| (assoc.author_id.clone(), assoc))
            .collect();

        for entry in authors {
            match existing_by_author.get(&entry.author_id) {
                Some(assoc) => {
                    let mut active: BookAuthorActiveModel = assoc.clone().into();
                    active.role = Set(entry.role);
                    active.updated_at = Set(now.clone());
                    active.update(&txn).await?;
                }
                None => {
                    ensure_author_exists(&txn, &entry.author_id).await?;
                    insert_association(&txn, id, &entry.author_id, entry.role, &now).await?;
                }
            }
        }
    }

    // 3. Scalar fields, skipping anything absent from the patch
    let mut book: BookActiveModel = book_model.into();
    if let Some(title) = patch.title {
        book.title = Set(title);
    }
    if let Some(author) = patch.author {
        book.author = Set(author);
    }
    if let Some(description) = patch.description {
        book.description = Set(Some(description));
    }
    if let Some(year) = patch.publication_year {
        book.publication_year = Set(Some(year));
    }
    if let Some(isbn) = patch.isbn {
        book.isbn = Set(Some(isbn));
    }
    book.updated_at = Set(now);
    book.update(&txn).await?;

    txn.commit().await?;

    get_book(db, id).await
}

/// Delete a book. The schema cascades remove its details, reviews and
/// author associations; author rows are untouched.
pub async fn delete_book(db: &DatabaseConnection, id: &str) -> Result<(), DomainError> {
    let book = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;

    book.delete(db).await?;
    tracing::info!(book_id = %id, "Book deleted");
    Ok(())
}

/// Create a new author (independent lifecycle from books).
pub async fn create_author(
    db: &DatabaseConnection,
    input: CreateAuthorInput,
) -> Result<Author, DomainError> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "First name and last name are required".into(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let author = crate::models::author::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        birth_date: Set(input.birth_date),
        biography: Set(input.biography),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = author.insert(db).await?;
    Ok(Author::from(model))
}

/// List all authors
pub async fn list_authors(db: &DatabaseConnection) -> Result<Vec<Author>, DomainError> {
    let authors = AuthorEntity::find().all(db).await?;
    Ok(authors.into_iter().map(Author::from).collect())
}

/// Get one author together with its associated books and roles.
pub async fn get_author(db: &DatabaseConnection, id: &str) -> Result<AuthorWithBooks, DomainError> {
    let author = AuthorEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Author".to_string()))?;

    let pairs = BookAuthorEntity::find()
        .filter(BookAuthorColumn::AuthorId.eq(id))
        .find_also_related(BookEntity)
        .all(db)
        .await?;

    let books = pairs
        .into_iter()
        .filter_map(|(assoc, book)| {
            book.map(|book| AssociatedBook {
                id: book.id,
                title: book.title,
                author: book.author,
                role: assoc.role,
            })
        })
        .collect();

    Ok(AuthorWithBooks {
        author: Author::from(author),
        books,
    })
}

/// Associate a book with an author. Fails with Conflict if the pair is
/// already associated (unique constraint on the join table).
pub async fn add_book_author(
    db: &DatabaseConnection,
    input: BookAuthorInput,
) -> Result<(), DomainError> {
    BookEntity::find_by_id(input.book_id.as_str())
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;
    ensure_author_exists(db, &input.author_id).await?;

    let existing = BookAuthorEntity::find()
        .filter(BookAuthorColumn::BookId.eq(input.book_id.as_str()))
        .filter(BookAuthorColumn::AuthorId.eq(input.author_id.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(DomainError::Conflict(
            "Book is already associated with this author".into(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    insert_association(db, &input.book_id, &input.author_id, input.role, &now).await?;
    Ok(())
}

/// Remove a single book-author association. The author row survives.
pub async fn remove_book_author(
    db: &DatabaseConnection,
    book_id: &str,
    author_id: &str,
) -> Result<(), DomainError> {
    let assoc = BookAuthorEntity::find()
        .filter(BookAuthorColumn::BookId.eq(book_id))
        .filter(BookAuthorColumn::AuthorId.eq(author_id))
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Association".to_string()))?;

    assoc.delete(db).await?;
    Ok(())
}

/// Create the details row for a book. Fails with Conflict when the book
/// already has one (one-to-one relation).
pub async fn create_book_details(
    db: &DatabaseConnection,
    book_id: &str,
    input: BookDetailsInput,
) -> Result<BookDetails, DomainError> {
    BookEntity::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;

    let existing = DetailsEntity::find()
        .filter(DetailsColumn::BookId.eq(book_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(DomainError::Conflict("Book already has details".into()));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let model = insert_details(db, book_id, input, &now).await?;
    Ok(BookDetails::from(model))
}

/// Get the details row for a book, failing with NotFound when absent.
pub async fn get_book_details(
    db: &DatabaseConnection,
    book_id: &str,
) -> Result<BookDetails, DomainError> {
    let details = DetailsEntity::find()
        .filter(DetailsColumn::BookId.eq(book_id))
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book details".to_string()))?;
    Ok(BookDetails::from(details))
}

/// Create a review. Rating must lie in [1, 5].
pub async fn create_review(
    db: &DatabaseConnection,
    book_id: &str,
    input: CreateReviewInput,
) -> Result<Review, DomainError> {
    if input.reviewer_name.trim().is_empty() {
        return Err(DomainError::Validation("Reviewer name is required".into()));
    }
    if !(1..=5).contains(&input.rating) {
        return Err(DomainError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }

    BookEntity::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::NotFound("Book".to_string()))?;

    let now = chrono::Utc::now().to_rfc3339();
    let review = ReviewActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        reviewer_name: Set(input.reviewer_name),
        rating: Set(input.rating),
        comment: Set(input.comment),
        book_id: Set(book_id.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let model = review.insert(db).await?;
    Ok(Review::from(model))
}

/// List the reviews for a book. An unknown book or a book with no reviews
/// both yield an empty list, never an error.
pub async fn list_book_reviews(
    db: &DatabaseConnection,
    book_id: &str,
) -> Result<Vec<Review>, DomainError> {
    let reviews = ReviewEntity::find()
        .filter(ReviewColumn::BookId.eq(book_id))
        .all(db)
        .await?;
    Ok(reviews.into_iter().map(Review::from).collect())
}

async fn ensure_author_exists<C: ConnectionTrait>(
    conn: &C,
    author_id: &str,
) -> Result<(), DomainError> {
    AuthorEntity::find_by_id(author_id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::NotFound("Author".to_string()))?;
    Ok(())
}

async fn insert_details<C: ConnectionTrait>(
    conn: &C,
    book_id: &str,
    input: BookDetailsInput,
    now: &str,
) -> Result<book_details::Model, DomainError> {
    let details = DetailsActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        page_count: Set(input.page_count),
        language: Set(input.language),
        publisher: Set(input.publisher),
        edition: Set(input.edition),
        book_id: Set(book_id.to_string()),
        created_at: Set(now.to_string()),
        updated_at: Set(now.to_string()),
        ..Default::default()
    };
    Ok(details.insert(conn).await?)
}

async fn insert_association<C: ConnectionTrait>(
    conn: &C,
    book_id: &str,
    author_id: &str,
    role: Option<String>,
    now: &str,
) -> Result<(), DomainError> {
    let assoc = BookAuthorActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        book_id: Set(book_id.to_string()),
        author_id: Set(author_id.to_string()),
        role: Set(role),
        created_at: Set(now.to_string()),
        updated_at: Set(now.to_string()),
        ..Default::default()
    };
    assoc.insert(conn).await?;
    Ok(())
}
