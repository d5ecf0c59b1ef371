//! Read-only projections handed to the presentation layer.

use serde::Serialize;

use nichelab_catalog::{Niche, Product};
use nichelab_core::{CategoryRanges, DomainResult};

/// One table row per niche member.
///
/// Rows mirror the member ordering, ascending by BSR. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub url: String,
    pub keywords: Vec<String>,
    pub bsr: u32,
    pub reviews: u32,
    pub monthly_revenue: f64,
    pub monthly_sales: u32,
    pub price: f64,
    pub cost: f64,
    pub profit: f64,
    pub profit_margin: f64,
}

impl ProductRow {
    fn from_product(product: &Product) -> Self {
        Self {
            url: product.url().to_string(),
            keywords: product.keywords().to_vec(),
            bsr: product.bsr(),
            reviews: product.reviews(),
            monthly_revenue: product.monthly_revenue(),
            monthly_sales: product.monthly_sales(),
            price: product.price(),
            cost: product.estimated_sourcing_cost(),
            profit: product.profit(),
            profit_margin: product.profit_margin(),
        }
    }
}

/// Niche-level expectations, read off the hypothesis product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NicheSummary {
    pub expected_monthly_revenue: f64,
    pub expected_monthly_sales: u32,
    /// Sourcing cost plus FBA and referral fees of the hypothesis product.
    pub expected_unit_cost: f64,
    pub expected_monthly_profit: f64,
    pub expected_profit_margin: f64,
}

impl NicheSummary {
    fn from_hypothesis(product: &Product) -> Self {
        Self {
            expected_monthly_revenue: product.monthly_revenue(),
            expected_monthly_sales: product.monthly_sales(),
            expected_unit_cost: product.estimated_sourcing_cost()
                + product.fba_fee()
                + product.referal_fee(),
            expected_monthly_profit: product.monthly_profit(),
            expected_profit_margin: product.profit_margin(),
        }
    }
}

/// Everything a front end needs to render one niche.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NicheView {
    pub name: String,
    pub category: String,
    pub number_products: usize,
    pub rows: Vec<ProductRow>,
    /// `None` while the niche has no members.
    pub summary: Option<NicheSummary>,
}

impl NicheView {
    pub(crate) fn project(
        name: &str,
        niche: &Niche,
        ranges: &CategoryRanges,
    ) -> DomainResult<Self> {
        let rows = niche.products().iter().map(ProductRow::from_product).collect();
        let summary = if niche.is_empty() {
            None
        } else {
            Some(NicheSummary::from_hypothesis(
                &niche.hypothesis_product(ranges)?,
            ))
        };
        Ok(Self {
            name: name.to_string(),
            category: niche.category().to_string(),
            number_products: niche.number_products(),
            rows,
            summary,
        })
    }
}
