use std::collections::BTreeMap;

use async_trait::async_trait;
use models::product::{Model as Product, ProductInput};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Process-local product store. Ids are handed out from a counter that
/// never reuses a value, mirroring a database identity column.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }

    /// Seeds the store with existing rows. New ids continue after the largest seeded id.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let rows: BTreeMap<i32, Product> = products.into_iter().map(|p| (p.product_id, p)).collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0).max(0);
        Self { inner: RwLock::new(Table { rows, last_id }) }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let mut table = self.inner.write().await;
        let id = match input.product_id {
            Some(id) if table.rows.contains_key(&id) => id,
            _ => {
                let next = table
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| ServiceError::Db("product id sequence exhausted".into()))?;
                table.last_id = next;
                next
            }
        };
        let product = Product {
            product_id: id,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        };
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let mut table = self.inner.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
