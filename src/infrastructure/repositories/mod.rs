//! Repository implementations using SeaORM

pub mod product_repository;
pub mod user_repository;

pub use product_repository::SeaOrmProductRepository;
pub use user_repository::SeaOrmUserRepository;
