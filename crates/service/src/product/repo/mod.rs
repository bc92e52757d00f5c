pub mod memory;
pub mod seaorm;

pub use memory::InMemoryProductRepository;
pub use seaorm::SeaOrmProductRepository;
