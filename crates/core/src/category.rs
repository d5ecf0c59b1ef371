//! Category reference table: the recommended Amazon categories and their
//! best-seller-rank bounds.

use serde::{Deserialize, Serialize};

/// Inclusive best-seller-rank bounds for one category.
///
/// Only `max` gates product validation. `min` is informational: front ends
/// use it to bound numeric input, nothing rejects a rank below it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BsrRange {
    pub min: u32,
    pub max: u32,
}

/// Lower edge of the retail price band considered healthy for a launch.
pub const PRICE_BAND_MIN: f64 = 19.99;

/// Upper edge of the healthy retail price band.
pub const PRICE_BAND_MAX: f64 = 50.0;

/// True when `price` sits inside the recommended retail band.
///
/// A price outside the band is a soft signal, never a validation failure.
pub fn price_in_band(price: f64) -> bool {
    (PRICE_BAND_MIN..=PRICE_BAND_MAX).contains(&price)
}

const BUILTIN_RANGES: &[(&str, BsrRange)] = &[
    ("baby", BsrRange { min: 100, max: 7500 }),
    ("beauty", BsrRange { min: 100, max: 19000 }),
    ("office", BsrRange { min: 100, max: 14000 }),
    ("pet supplies", BsrRange { min: 100, max: 14000 }),
    ("sports and outdoors", BsrRange { min: 100, max: 17000 }),
    ("home and kitchen", BsrRange { min: 100, max: 24000 }),
    ("kitchen and dining", BsrRange { min: 100, max: 17000 }),
    ("patio, lawn and garden", BsrRange { min: 100, max: 8500 }),
    ("toys and games", BsrRange { min: 100, max: 17000 }),
];

/// Read-only mapping from category name to its BSR bounds.
///
/// One instance is shared between product validation and whatever front end
/// bounds its numeric inputs; the table is never edited at run time.
/// Iteration preserves the curated ordering of [`CategoryRanges::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRanges {
    ranges: Vec<(String, BsrRange)>,
}

impl Default for CategoryRanges {
    /// The nine categories recommended for private-label sellers.
    fn default() -> Self {
        Self {
            ranges: BUILTIN_RANGES
                .iter()
                .map(|(category, range)| ((*category).to_string(), *range))
                .collect(),
        }
    }
}

impl CategoryRanges {
    /// Bounds for `category`, or `None` if it is not a recommended category.
    pub fn bounds(&self, category: &str) -> Option<BsrRange> {
        self.ranges
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, range)| *range)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.bounds(category).is_some()
    }

    /// Categories with their bounds, in curated order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, BsrRange)> {
        self.ranges
            .iter()
            .map(|(name, range)| (name.as_str(), *range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
