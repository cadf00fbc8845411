use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductFilter;
use crate::models::{NewProduct, Product, UpdateProduct};

/// Document store operations over products
///
/// Inputs are already validated. `update` and `delete` return `None` when no
/// document has the id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product, assigning its id and creation time
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Products matching `filter`, sorted and paginated as it says
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply the present fields and return the full updated product
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Remove a product and return what was removed
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>>;
}

/// Turn a path segment into a product id.
///
/// A malformed id is a store-level failure (500), not a miss.
pub fn parse_product_id(raw: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| ProductError::InvalidId {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        let id = Uuid::now_v7();
        assert_eq!(parse_product_id(&id.to_string()).unwrap(), id);

        let err = parse_product_id("12345").unwrap_err();
        assert!(matches!(err, ProductError::InvalidId { ref raw, .. } if raw == "12345"));
        assert!(err.to_string().starts_with("Invalid product id '12345': "));
    }
}
