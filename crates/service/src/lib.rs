//! Service layer for the inventory: product persistence behind a
//! repository trait and a thin application service on top of it.
//! - `product::repository` defines the storage contract.
//! - `product::repo` holds the SeaORM and in-memory adapters.
//! - `product::service` is what the HTTP layer calls.

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test_support;
