//! List query assembly
//!
//! [`ProductQuery`] is the raw query string; [`ProductFilter`] is the
//! store-independent query built from it. Parameters constrain the
//! result only when present.

use serde::Deserialize;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Query parameters accepted by `GET /products`
///
/// Values are kept as text so that unparseable `page`/`limit` can fall back
/// to their defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[param(value_type = Option<f64>)]
    pub min_price: Option<String>,
    /// Inclusive upper price bound
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    /// `price_asc` or `price_desc`; anything else keeps store order
    #[param(value_type = Option<PriceSort>)]
    pub sort_by: Option<String>,
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Page size (default 10)
    #[param(value_type = Option<u64>, minimum = 1)]
    pub limit: Option<String>,
}

/// Ordering by price; parsing is case-sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[schema(rename_all = "snake_case")]
pub enum PriceSort {
    PriceAsc,
    PriceDesc,
}

/// Inclusive bounds on `price`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// What to fetch, in which order, and which page of it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub price: PriceRange,
    /// `None` keeps store order
    pub sort: Option<PriceSort>,
    pub pagination: Pagination,
}

impl ProductFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Fails only when `minPrice` or `maxPrice` is present but not a number.
    pub fn from_query(query: ProductQuery) -> ProductResult<Self> {
        let price = PriceRange {
            min: parse_price("minPrice", query.min_price.as_deref())?,
            max: parse_price("maxPrice", query.max_price.as_deref())?,
        };

        let sort = present(query.sort_by.as_deref()).and_then(|s| s.parse::<PriceSort>().ok());

        let pagination = Pagination {
            page: parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        };

        Ok(Self {
            category: present(query.category.as_deref()).map(str::to_string),
            price,
            sort,
            pagination,
        })
    }

    /// Whether `product` satisfies the category and price constraints
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && self.price.contains(product.price)
    }
}

/// Empty parameters count as absent
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_price(name: &str, raw: Option<&str>) -> ProductResult<Option<f64>> {
    let Some(raw) = present(raw) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| ProductError::InvalidQuery(format!("{} must be a number, got '{}'", name, raw)))
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    present(raw)?
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|v| *v >= 1)
}
