//! Persistence models for the inventory service: the SeaORM `product`
//! entity, its write-side input, and database connection helpers.

pub mod errors;
pub mod db;
pub mod product;
