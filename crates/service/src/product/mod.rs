//! Product module: repository contract, storage adapters and the service.

pub mod repository;
pub mod repo;
pub mod service;

pub use repository::ProductRepository;
pub use service::ProductService;
