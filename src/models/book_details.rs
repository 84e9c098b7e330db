use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub page_count: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    // UNIQUE in the schema: one details row per book
    pub book_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: String,
    pub page_count: Option<i32>,
    pub language: Option<String>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    pub book_id: String,
}

impl From<Model> for BookDetails {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            page_count: model.page_count,
            language: model.language,
            publisher: model.publisher,
            edition: model.edition,
            book_id: model.book_id,
        }
    }
}
