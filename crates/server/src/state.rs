use std::sync::Arc;

use service::product::repo::InMemoryProductRepository;
use service::product::service::DynProductService;
use service::product::{ProductRepository, ProductService};

/// Shared handler state. Cloned per request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<DynProductService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(ProductService::new(repo)) }
    }

    /// State over an empty process-local store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }
}
