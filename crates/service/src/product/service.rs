use std::sync::Arc;

use models::product::{Model as Product, ProductInput};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Application service for products. Currently a straight delegation to the
/// repository; it is the place business rules would go.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as held by the HTTP layer.
pub type DynProductService = ProductService<dyn ProductRepository>;

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.repo.find_all().await?;
        debug!(count = products.len(), "products loaded");
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn find_product_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// No validation happens here; the repository decides insert vs update.
    #[instrument(skip(self, input), fields(product_id = ?input.product_id))]
    pub async fn save_product(&self, input: ProductInput) -> Result<Product, ServiceError> {
        self.repo.save(input).await
    }

    /// Deletes without checking existence first; callers do that.
    #[instrument(skip(self))]
    pub async fn delete_product_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        self.repo.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repo::InMemoryProductRepository;

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn input(description: &str, price: f64, quantity: i32) -> ProductInput {
        ProductInput { product_id: None, description: Some(description.into()), price: Some(price), quantity: Some(quantity) }
    }

    #[tokio::test]
    async fn find_returns_last_saved_state() {
        let svc = service();
        let created = svc.save_product(input("Widget", 9.99, 10)).await.unwrap();
        let changed = svc
            .save_product(ProductInput { product_id: Some(created.product_id), ..input("Widget v2", 10.5, 3) })
            .await
            .unwrap();
        let found = svc.find_product_by_id(created.product_id).await.unwrap();
        assert_eq!(found, Some(changed));
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let svc = service();
        assert_eq!(svc.find_product_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_then_find_is_absent() {
        let svc = service();
        let p = svc.save_product(input("Bolt", 0.1, 100)).await.unwrap();
        assert!(svc.delete_product_by_id(p.product_id).await.unwrap());
        assert_eq!(svc.find_product_by_id(p.product_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_does_not_check_existence() {
        let svc = service();
        assert!(!svc.delete_product_by_id(12).await.unwrap());
    }

    #[tokio::test]
    async fn list_counts_live_records() {
        let svc = service();
        let a = svc.save_product(input("a", 1.0, 1)).await.unwrap();
        svc.save_product(input("b", 2.0, 2)).await.unwrap();
        svc.save_product(input("c", 3.0, 3)).await.unwrap();
        svc.delete_product_by_id(a.product_id).await.unwrap();
        assert_eq!(svc.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn repeated_merge_is_idempotent() {
        let svc = service();
        let p = svc.save_product(input("A", 1.0, 2)).await.unwrap();
        let changes = input("B", 3.5, 9);

        let once = svc.save_product(p.clone().merge(changes.clone()).into()).await.unwrap();
        let twice = svc.save_product(once.clone().merge(changes).into()).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.product_id, p.product_id);
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
        let svc: DynProductService = ProductService::new(repo);
        let p = svc.save_product(input("dyn", 1.0, 1)).await.unwrap();
        assert_eq!(svc.list_products().await.unwrap(), vec![p]);
    }
}
