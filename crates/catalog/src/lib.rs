//! Product/niche domain model.
//!
//! This crate contains the business rules for evaluating candidate FBA
//! products and niches, implemented purely as deterministic domain logic
//! (no IO, no storage).

pub mod niche;
pub mod product;

pub use niche::Niche;
pub use product::{PricePoint, Product, ProductRecord, default_price_range};
