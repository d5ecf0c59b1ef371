//! `nichelab-core` — foundation of the niche evaluation domain.
//!
//! Pure domain primitives: the error model and the read-only category
//! reference table. No IO, no storage, no presentation concerns.

pub mod category;
pub mod error;

pub use category::{BsrRange, CategoryRanges, PRICE_BAND_MAX, PRICE_BAND_MIN, price_in_band};
pub use error::{DomainError, DomainResult};
