//! Repository trait definitions
//!
//! These traits define the contract for data access to the flat entities.
//! Implementations live in the infrastructure layer. The book aggregate is
//! orchestrated by the service layer instead, since its mutations span
//! several tables inside one transaction.

use async_trait::async_trait;

use super::DomainError;

/// User data for API responses
#[derive(Debug, Clone, serde::Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a user
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Repository trait for the User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find all users
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Case-insensitive substring search over name and email
    async fn search(&self, query: &str) -> Result<Vec<User>, DomainError>;

    /// Create a single user
    async fn create(&self, input: NewUser) -> Result<User, DomainError>;

    /// Create a batch of users in one transaction; any failure rolls the
    /// whole batch back so that zero rows are committed
    async fn create_many(&self, inputs: Vec<NewUser>) -> Result<Vec<User>, DomainError>;
}

/// Product data for API responses
#[derive(Debug, Clone, serde::Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

/// Input for creating a product
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<i32>,
}

/// Input for updating a product (absent fields are left unchanged)
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

/// Repository trait for the Product entity
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find all products
    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;

    /// Find a product by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;

    /// Create a new product
    async fn create(&self, input: NewProduct) -> Result<Product, DomainError>;

    /// Update a product
    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Product, DomainError>;

    /// Delete a product by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
