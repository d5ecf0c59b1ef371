use serde::{Deserialize, Serialize};

use nichelab_core::{CategoryRanges, DomainError, DomainResult, price_in_band};

/// Effective VAT share of the unit price (75% of the 23% rate).
const VAT_FACTOR: f64 = 0.75 * 0.23;

/// Monthly subscription for the product research tooling.
const RESEARCH_SUBSCRIPTION_FEE: f64 = 50.0;

/// Monthly pay-per-click advertising budget.
const PPC_FEE: f64 = 500.0;

/// Raw product inputs, exactly as hand-entered and exactly as persisted.
///
/// Derived economics are never serialized; they are recomputed from these
/// ten fields on load. The serialized names (`BSR`, `referal_fee`, ...) are
/// pinned to the on-disk document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub keywords: Vec<String>,
    pub category: String,
    pub price: f64,
    #[serde(rename = "BSR")]
    pub bsr: u32,
    pub reviews: u32,
    pub monthly_sales: u32,
    pub estimated_sourcing_cost: f64,
    pub fba_fee: f64,
    pub referal_fee: f64,
}

/// A validated Amazon product with its profitability economics.
///
/// Immutable once constructed: derived fields are computed in
/// [`Product::new`] and frozen. Compared by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    record: ProductRecord,
    monthly_revenue: f64,
    vat: f64,
    profit: f64,
    monthly_profit: f64,
    profit_margin: f64,
}

impl Product {
    /// Validate a raw record against the category table and freeze its
    /// derived economics.
    ///
    /// Fails when the category is unknown or the BSR is above the category
    /// ceiling. A price outside the recommended retail band only logs a
    /// warning.
    pub fn new(record: ProductRecord, ranges: &CategoryRanges) -> DomainResult<Self> {
        let Some(bounds) = ranges.bounds(&record.category) else {
            return Err(DomainError::unknown_category(&record.category));
        };
        // The ceiling gates construction; the floor is informational only.
        if record.bsr > bounds.max {
            return Err(DomainError::too_high_bsr(
                &record.category,
                record.bsr,
                bounds.max,
            ));
        }
        if !price_in_band(record.price) {
            tracing::warn!(
                price = record.price,
                "product price outside the recommended 19.99..50.00 retail band"
            );
        }

        let monthly_sales = f64::from(record.monthly_sales);
        let monthly_revenue = monthly_sales * record.price;
        let vat = VAT_FACTOR * record.price;
        let profit = record.price
            - record.estimated_sourcing_cost
            - record.fba_fee
            - record.referal_fee
            - vat;
        let monthly_profit = profit * monthly_sales - RESEARCH_SUBSCRIPTION_FEE - PPC_FEE;
        let profit_margin = profit / record.price;

        Ok(Self {
            record,
            monthly_revenue,
            vat,
            profit,
            monthly_profit,
            profit_margin,
        })
    }

    /// The ten raw inputs this product was built from.
    ///
    /// [`Product::new`] applied to this record reconstructs an equal product,
    /// re-running the same validation.
    pub fn record(&self) -> &ProductRecord {
        &self.record
    }

    pub fn url(&self) -> &str {
        &self.record.url
    }

    pub fn keywords(&self) -> &[String] {
        &self.record.keywords
    }

    pub fn category(&self) -> &str {
        &self.record.category
    }

    pub fn price(&self) -> f64 {
        self.record.price
    }

    pub fn bsr(&self) -> u32 {
        self.record.bsr
    }

    pub fn reviews(&self) -> u32 {
        self.record.reviews
    }

    pub fn monthly_sales(&self) -> u32 {
        self.record.monthly_sales
    }

    pub fn estimated_sourcing_cost(&self) -> f64 {
        self.record.estimated_sourcing_cost
    }

    pub fn fba_fee(&self) -> f64 {
        self.record.fba_fee
    }

    pub fn referal_fee(&self) -> f64 {
        self.record.referal_fee
    }

    pub fn monthly_revenue(&self) -> f64 {
        self.monthly_revenue
    }

    pub fn vat(&self) -> f64 {
        self.vat
    }

    /// Per-unit profit after sourcing, fees and VAT.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Unit profit times monthly sales, minus the fixed monthly overhead
    /// (research subscription + ad budget).
    pub fn monthly_profit(&self) -> f64 {
        self.monthly_profit
    }

    /// Between 0.15 and 0.20 is considered a healthy margin.
    pub fn profit_margin(&self) -> f64 {
        self.profit_margin
    }

    /// Price at which the per-unit profit is exactly zero, holding the cost
    /// inputs fixed.
    pub fn break_even_price(&self) -> f64 {
        self.record.estimated_sourcing_cost + self.record.fba_fee + self.record.referal_fee
            + self.vat
    }

    /// Projected monthly revenue across candidate unit prices.
    ///
    /// The per-unit profit in this projection excludes VAT; the frozen
    /// [`profit`](Self::profit) field does not. Pure: nothing is mutated.
    pub fn revenue_curve(&self, prices: impl IntoIterator<Item = f64>) -> Vec<PricePoint> {
        let monthly_sales = f64::from(self.record.monthly_sales);
        prices
            .into_iter()
            .map(|price| {
                let profit = price
                    - self.record.estimated_sourcing_cost
                    - self.record.fba_fee
                    - self.record.referal_fee;
                PricePoint {
                    price,
                    monthly_revenue: profit * monthly_sales,
                }
            })
            .collect()
    }
}

/// One point on a price/revenue projection.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub price: f64,
    pub monthly_revenue: f64,
}

/// Default candidate prices for [`Product::revenue_curve`]: whole-dollar
/// prices from 5 to 99.
pub fn default_price_range() -> impl Iterator<Item = f64> {
    (5..100).map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> CategoryRanges {
        CategoryRanges::default()
    }

    fn baby_record() -> ProductRecord {
        ProductRecord {
            url: "https://www.amazon.com/dp/B0TEST".to_string(),
            keywords: vec!["bottle".to_string(), "warmer".to_string()],
            category: "baby".to_string(),
            price: 25.0,
            bsr: 1200,
            reviews: 340,
            monthly_sales: 300,
            estimated_sourcing_cost: 5.0,
            fba_fee: 3.0,
            referal_fee: 3.75,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn construction_rejects_unknown_category() {
        let record = ProductRecord {
            category: "electronics".to_string(),
            ..baby_record()
        };
        let err = Product::new(record, &ranges()).unwrap_err();
        assert_eq!(err, DomainError::unknown_category("electronics"));
    }

    #[test]
    fn construction_rejects_bsr_above_category_ceiling() {
        let record = ProductRecord {
            category: "kitchen and dining".to_string(),
            bsr: 20000,
            ..baby_record()
        };
        let err = Product::new(record, &ranges()).unwrap_err();
        assert_eq!(
            err,
            DomainError::too_high_bsr("kitchen and dining", 20000, 17000)
        );
    }

    #[test]
    fn bsr_below_category_floor_is_accepted() {
        // The floor is informational; only the ceiling gates construction.
        let record = ProductRecord {
            bsr: 5,
            ..baby_record()
        };
        assert!(Product::new(record, &ranges()).is_ok());
    }

    #[test]
    fn price_outside_band_warns_but_constructs() {
        let record = ProductRecord {
            price: 10.0,
            ..baby_record()
        };
        let product = Product::new(record, &ranges()).unwrap();
        assert!(close(product.price(), 10.0));
    }

    #[test]
    fn derived_economics_are_computed_at_construction() {
        let product = Product::new(baby_record(), &ranges()).unwrap();
        let vat = 0.75 * 0.23 * 25.0;
        let profit = 25.0 - 5.0 - 3.0 - 3.75 - vat;
        assert!(close(product.monthly_revenue(), 300.0 * 25.0));
        assert!(close(product.vat(), vat));
        assert!(close(product.profit(), profit));
        assert!(close(product.monthly_profit(), profit * 300.0 - 550.0));
        assert!(close(product.profit_margin(), profit / 25.0));
    }

    #[test]
    fn break_even_price_zeroes_the_profit() {
        let product = Product::new(baby_record(), &ranges()).unwrap();
        let expected = 5.0 + 3.0 + 3.75 + product.vat();
        assert!(close(product.break_even_price(), expected));
    }

    #[test]
    fn revenue_curve_excludes_vat() {
        let product = Product::new(baby_record(), &ranges()).unwrap();
        let points = product.revenue_curve([30.0]);
        assert_eq!(points.len(), 1);
        assert!(close(points[0].price, 30.0));
        // profit here is price - sourcing - fba - referal, with no VAT term
        let expected = (30.0 - 5.0 - 3.0 - 3.75) * 300.0;
        assert!(close(points[0].monthly_revenue, expected));
    }

    #[test]
    fn default_price_range_covers_whole_dollars_5_to_99() {
        let prices: Vec<f64> = default_price_range().collect();
        assert_eq!(prices.len(), 95);
        assert!(close(prices[0], 5.0));
        assert!(close(prices[94], 99.0));
    }

    #[test]
    fn record_round_trips_through_the_persisted_field_names() {
        let record = baby_record();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("BSR").is_some());
        assert!(json.get("referal_fee").is_some());
        assert!(json.get("bsr").is_none());
        let back: ProductRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn reconstruction_from_record_is_field_for_field_equal() {
        let product = Product::new(baby_record(), &ranges()).unwrap();
        let rebuilt = Product::new(product.record().clone(), &ranges()).unwrap();
        assert_eq!(rebuilt, product);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the profit identities hold for all valid inputs.
            #[test]
            fn profit_identities_hold(
                price in 1.0f64..200.0,
                sourcing in 0.0f64..50.0,
                fba in 0.0f64..20.0,
                referal in 0.0f64..20.0,
                monthly_sales in 0u32..10_000,
                bsr in 100u32..=7500,
                reviews in 0u32..5_000,
            ) {
                let record = ProductRecord {
                    url: String::new(),
                    keywords: vec![],
                    category: "baby".to_string(),
                    price,
                    bsr,
                    reviews,
                    monthly_sales,
                    estimated_sourcing_cost: sourcing,
                    fba_fee: fba,
                    referal_fee: referal,
                };
                let product = Product::new(record, &CategoryRanges::default()).unwrap();

                let vat = 0.75 * 0.23 * price;
                let profit = price - sourcing - fba - referal - vat;
                prop_assert!((product.vat() - vat).abs() < 1e-9);
                prop_assert!((product.profit() - profit).abs() < 1e-9);
                prop_assert!(
                    (product.profit_margin() - product.profit() / price).abs() < 1e-12
                );
                prop_assert!(
                    (product.monthly_revenue() - f64::from(monthly_sales) * price).abs() < 1e-6
                );
                prop_assert!(
                    (product.monthly_profit()
                        - (product.profit() * f64::from(monthly_sales) - 550.0))
                        .abs() < 1e-6
                );
            }

            /// Property: profit is exactly the distance to the break-even
            /// price (VAT held at the evaluated price).
            #[test]
            fn profit_is_distance_to_break_even(
                price in 1.0f64..200.0,
                sourcing in 0.0f64..50.0,
                fba in 0.0f64..20.0,
                referal in 0.0f64..20.0,
            ) {
                let record = ProductRecord {
                    url: String::new(),
                    keywords: vec![],
                    category: "baby".to_string(),
                    price,
                    bsr: 1000,
                    reviews: 10,
                    monthly_sales: 100,
                    estimated_sourcing_cost: sourcing,
                    fba_fee: fba,
                    referal_fee: referal,
                };
                let product = Product::new(record, &CategoryRanges::default()).unwrap();
                prop_assert!(
                    (product.profit() - (product.price() - product.break_even_price()))
                        .abs() < 1e-9
                );
            }
        }
    }
}
