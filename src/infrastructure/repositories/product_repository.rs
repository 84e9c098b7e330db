//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{DomainError, NewProduct, Product, ProductPatch, ProductRepository};
use crate::models::product::{ActiveModel, Entity as ProductEntity, Model};

/// SeaORM-based implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_dto(model: Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        stock: model.stock,
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let products = ProductEntity::find().all(&self.db).await?;
        Ok(products.into_iter().map(to_dto).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let product = ProductEntity::find_by_id(id).one(&self.db).await?;
        Ok(product.map(to_dto))
    }

    async fn create(&self, input: NewProduct) -> Result<Product, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let product = ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock.unwrap_or(0)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = product.insert(&self.db).await?;
        Ok(to_dto(model))
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Product, DomainError> {
        let model = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound("Product".to_string()))?;

        let mut product: ActiveModel = model.into();
        if let Some(name) = patch.name {
            product.name = Set(name);
        }
        if let Some(description) = patch.description {
            product.description = Set(Some(description));
        }
        if let Some(price) = patch.price {
            product.price = Set(price);
        }
        if let Some(stock) = patch.stock {
            product.stock = Set(stock);
        }
        product.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = product.update(&self.db).await?;
        Ok(to_dto(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let res = ProductEntity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(DomainError::NotFound("Product".to_string()));
        }
        Ok(())
    }
}
