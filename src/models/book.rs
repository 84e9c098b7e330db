use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::author::Author;
use super::book_details::BookDetails;
use super::review::Review;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::book_details::Entity")]
    Details,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::book_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_author::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_author::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API responses: a book with its eagerly loaded associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BookDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<AssociatedAuthor>>,
}

/// An author entry on a book, annotated with its association role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedAuthor {
    #[serde(flatten)]
    pub author: Author,
    pub role: Option<String>,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            description: model.description,
            publication_year: model.publication_year,
            isbn: model.isbn,
            details: None,
            reviews: None,
            authors: None,
        }
    }
}
