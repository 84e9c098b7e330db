//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{ProductRepository, UserRepository};
use crate::infrastructure::{SeaOrmProductRepository, SeaOrmUserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (book aggregate handlers go through services)
    db: DatabaseConnection,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Product repository
    pub product_repo: Arc<dyn ProductRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let product_repo = Arc::new(SeaOrmProductRepository::new(db.clone()));

        Self {
            db,
            user_repo,
            product_repo,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Allow extracting DatabaseConnection directly in handlers that only need it
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
