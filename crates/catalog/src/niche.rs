use nichelab_core::{CategoryRanges, DomainError, DomainResult};

use crate::product::{Product, ProductRecord};

/// A niche rated too competitive when at least this many members all sit
/// above the review floor.
const COMPETITIVE_MEMBER_COUNT: usize = 3;

/// Review count above which an incumbent is considered entrenched.
const COMPETITIVE_REVIEW_FLOOR: u32 = 1000;

/// An ordered set of candidate products sharing one Amazon category.
///
/// Members are kept sorted ascending by BSR: the lowest-rank member is the
/// primary product, the rest are its competitors. Aggregate state is
/// recomputed on every membership change. The empty niche is a valid state.
///
/// Membership only grows; whole niches are deleted at the store level,
/// individual products never are.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Niche {
    /// Sorted ascending by BSR; equal ranks keep insertion order.
    products: Vec<Product>,
    /// Category shared by every member, `""` while empty.
    category: String,
}

impl Niche {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a niche from existing products, validating the whole set at
    /// once before committing.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut niche = Self::new();
        if products.is_empty() {
            return Ok(niche);
        }
        Self::validate_members(&products)?;
        niche.category = products[0].category().to_string();
        niche.products = products;
        niche.products.sort_by_key(Product::bsr);
        Ok(niche)
    }

    /// Rebuild a niche from persisted records, re-running product validation
    /// and the membership checks.
    pub fn from_records(records: &[ProductRecord], ranges: &CategoryRanges) -> DomainResult<Self> {
        let products = records
            .iter()
            .map(|record| Product::new(record.clone(), ranges))
            .collect::<DomainResult<Vec<_>>>()?;
        Self::from_products(products)
    }

    /// Add a product, validating the prospective membership first.
    ///
    /// A rejected add leaves the niche exactly as it was.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        if !self.products.is_empty() && product.category() != self.category {
            return Err(DomainError::mixed_category(
                &self.category,
                product.category(),
            ));
        }

        let prospective_count = self.products.len() + 1;
        if prospective_count >= COMPETITIVE_MEMBER_COUNT {
            let min_reviews = self
                .products
                .iter()
                .map(Product::reviews)
                .chain([product.reviews()])
                .min()
                .unwrap_or(0);
            if min_reviews > COMPETITIVE_REVIEW_FLOOR {
                return Err(DomainError::too_competitive(prospective_count, min_reviews));
            }
        }

        self.category = product.category().to_string();
        // Insert after any member of equal rank, keeping the order stable.
        let at = self.products.partition_point(|p| p.bsr() <= product.bsr());
        self.products.insert(at, product);
        Ok(())
    }

    fn validate_members(products: &[Product]) -> DomainResult<()> {
        let mut categories = products.iter().map(Product::category);
        if let Some(first) = categories.next() {
            for category in categories {
                if category != first {
                    return Err(DomainError::mixed_category(first, category));
                }
            }
        }
        if products.len() >= COMPETITIVE_MEMBER_COUNT {
            let min_reviews = products.iter().map(Product::reviews).min().unwrap_or(0);
            if min_reviews > COMPETITIVE_REVIEW_FLOOR {
                return Err(DomainError::too_competitive(products.len(), min_reviews));
            }
        }
        Ok(())
    }

    pub fn number_products(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category shared by every member, `""` while the niche is empty.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Members in ascending BSR order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The lowest-BSR member, if any.
    pub fn primary_product(&self) -> Option<&Product> {
        self.products.first()
    }

    /// Everything but the primary, still in ascending BSR order.
    pub fn competitors(&self) -> &[Product] {
        self.products.get(1..).unwrap_or(&[])
    }

    /// Member records in ascending BSR order; the persisted shape of the
    /// niche.
    pub fn to_records(&self) -> Vec<ProductRecord> {
        self.products
            .iter()
            .map(|product| product.record().clone())
            .collect()
    }

    /// A synthetic product whose every numeric field is the arithmetic mean
    /// across members; url and keywords are blank.
    ///
    /// Integer fields round the mean to the nearest whole number. The
    /// averaged record goes back through [`Product::new`], so the category
    /// and BSR checks run again. Fails with [`DomainError::EmptyNiche`] on a
    /// niche with no members.
    pub fn hypothesis_product(&self, ranges: &CategoryRanges) -> DomainResult<Product> {
        if self.products.is_empty() {
            return Err(DomainError::EmptyNiche);
        }
        let count = self.products.len() as f64;
        let mean = |field: fn(&Product) -> f64| {
            self.products.iter().map(field).sum::<f64>() / count
        };
        let mean_rounded = |field: fn(&Product) -> u32| {
            let total: f64 = self.products.iter().map(|p| f64::from(field(p))).sum();
            (total / count).round() as u32
        };

        let record = ProductRecord {
            url: String::new(),
            keywords: vec![String::new()],
            category: self.category.clone(),
            price: mean(Product::price),
            bsr: mean_rounded(Product::bsr),
            reviews: mean_rounded(Product::reviews),
            monthly_sales: mean_rounded(Product::monthly_sales),
            estimated_sourcing_cost: mean(Product::estimated_sourcing_cost),
            fba_fee: mean(Product::fba_fee),
            referal_fee: mean(Product::referal_fee),
        };
        Product::new(record, ranges)
    }
}
