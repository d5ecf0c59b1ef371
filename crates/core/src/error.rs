//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, request-local validation failure.
/// Infrastructure failures (files, serialization) belong to the store layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The product category is not in the reference table.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    /// The product ranks above the category's best-seller-rank ceiling.
    #[error("BSR {bsr} is above the {category:?} ceiling of {max}")]
    TooHighBsr {
        category: String,
        bsr: u32,
        max: u32,
    },

    /// A niche would end up holding products from two categories.
    #[error("niche holds {expected:?} products, cannot add {found:?}")]
    MixedCategory { expected: String, found: String },

    /// Every member of the niche already has more reviews than a new entrant
    /// could realistically catch up with.
    #[error("too competitive: {members} products, none below {min_reviews} reviews")]
    TooCompetitive { members: usize, min_reviews: u32 },

    /// A hypothesis product was requested for a niche with no members.
    #[error("niche has no products")]
    EmptyNiche,
}

impl DomainError {
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory(category.into())
    }

    pub fn too_high_bsr(category: impl Into<String>, bsr: u32, max: u32) -> Self {
        Self::TooHighBsr {
            category: category.into(),
            bsr,
            max,
        }
    }

    pub fn mixed_category(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MixedCategory {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn too_competitive(members: usize, min_reviews: u32) -> Self {
        Self::TooCompetitive {
            members,
            min_reviews,
        }
    }
}
