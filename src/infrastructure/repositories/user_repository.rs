//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::domain::{DomainError, NewUser, User, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity, Model};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_dto(model: Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

async fn insert_user(txn: &DatabaseTransaction, input: NewUser) -> Result<Model, DomainError> {
    let now = chrono::Utc::now().to_rfc3339();
    let user = ActiveModel {
        name: Set(input.name),
        email: Set(input.email),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(user.insert(txn).await?)
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = UserEntity::find().all(&self.db).await?;
        Ok(users.into_iter().map(to_dto).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user.map(to_dto))
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, DomainError> {
        // LIKE is case-insensitive for ASCII on SQLite
        let cond = Condition::any()
            .add(Column::Name.contains(query))
            .add(Column::Email.contains(query));
        let users = UserEntity::find().filter(cond).all(&self.db).await?;
        Ok(users.into_iter().map(to_dto).collect())
    }

    async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        let txn = self.db.begin().await?;
        let model = insert_user(&txn, input).await?;
        txn.commit().await?;
        Ok(to_dto(model))
    }

    async fn create_many(&self, inputs: Vec<NewUser>) -> Result<Vec<User>, DomainError> {
        let txn = self.db.begin().await?;

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            // Any failure drops the transaction uncommitted, rolling back
            // every row inserted so far
            let model = insert_user(&txn, input).await?;
            created.push(to_dto(model));
        }

        txn.commit().await?;
        Ok(created)
    }
}
