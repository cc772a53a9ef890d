pub mod sqlite;

use crate::error::AppError;
use crate::models::product::{Product, ProductCreate, ProductUpdate, Statistics};

/// Synchronous seam to the durable product catalog. The agent only ever sees
/// this trait; the concrete store is injected at startup.
pub trait Catalog: Send + Sync {
    fn list(&self, category: Option<&str>) -> Result<Vec<Product>, AppError>;
    fn get(&self, product_id: i64) -> Result<Option<Product>, AppError>;
    fn create(&self, fields: ProductCreate) -> Result<Product, AppError>;
    fn update(&self, product_id: i64, fields: ProductUpdate) -> Result<Option<Product>, AppError>;
    fn delete(&self, product_id: i64) -> Result<bool, AppError>;
    fn statistics(&self) -> Result<Statistics, AppError>;
}
