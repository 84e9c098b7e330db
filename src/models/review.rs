use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub reviewer_name: String,
    // Constrained to 1..=5, checked in the service layer before insert
    pub rating: i32,
    pub comment: Option<String>,
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
pub struct Review {
    pub id: String,
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub book_id: String,
}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            reviewer_name: model.reviewer_name,
            rating: model.rating,
            comment: model.comment,
            book_id: model.book_id,
        }
    }
}
