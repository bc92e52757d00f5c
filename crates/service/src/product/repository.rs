use async_trait::async_trait;
use models::product::{Model as Product, ProductInput};

use crate::errors::ServiceError;

/// Storage contract for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every stored product, ascending by id.
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Overwrites the row whose id matches `input.product_id`, or inserts a
    /// new row with a freshly assigned id when there is no such row.
    async fn save(&self, input: ProductInput) -> Result<Product, ServiceError>;
    /// Returns whether a row was removed; deleting a missing id is a no-op.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}
