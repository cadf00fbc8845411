//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::filter::{ProductFilter, ProductQuery};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::{parse_product_id, ProductRepository};
use crate::validation::{validate_create, validate_update};

/// Validates input, assembles list queries and maps misses to errors
/// before delegating to the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching the query; an empty result is [`ProductError::NoMatches`]
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = ProductFilter::from_query(query)?;
        let products = self.repository.find(filter).await?;

        if products.is_empty() {
            return Err(ProductError::NoMatches);
        }
        Ok(products)
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let input = validate_create(input)?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let id = parse_product_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let id = parse_product_id(id)?;
        let input = validate_update(input)?;
        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product, returning it
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Product> {
        let id = parse_product_id(id)?;
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Pagination, PriceRange};
    use crate::models::NewProduct;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn product(price: f64) -> Product {
        Product::new(NewProduct {
            name: "Desk".to_string(),
            description: "Standing desk".to_string(),
            price,
            category: "furniture".to_string(),
            in_stock: true,
            tags: vec![],
        })
    }

    #[tokio::test]
    async fn test_list_passes_assembled_filter() {
        let mut mock_repo = MockProductRepository::new();
        let expected = ProductFilter {
            category: Some("furniture".to_string()),
            price: PriceRange {
                min: Some(10.0),
                max: None,
            },
            sort: None,
            pagination: Pagination { page: 2, limit: 5 },
        };
        mock_repo
            .expect_find()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(vec![product(120.0)]));

        let service = ProductService::new(mock_repo);
        let query = ProductQuery {
            category: Some("furniture".to_string()),
            min_price: Some("10".to_string()),
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
            ..Default::default()
        };
        let products = service.list_products(query).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_list_empty_is_no_matches() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find().returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let err = service
            .list_products(ProductQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NoMatches));
    }

    #[tokio::test]
    async fn test_list_bad_price_never_reaches_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find().never();

        let service = ProductService::new(mock_repo);
        let query = ProductQuery {
            max_price: Some("lots".to_string()),
            ..Default::default()
        };
        let err = service.list_products(query).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_store_call() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(CreateProduct {
                name: Some("Desk".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(ref v) if v.len() == 3));
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input: &NewProduct| input.in_stock && input.tags.is_empty())
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(CreateProduct {
                name: Some("Desk".to_string()),
                description: Some("Oak".to_string()),
                price: Some(300.0),
                category: Some("furniture".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.in_stock);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(&id.to_string()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_malformed_id_is_invalid_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().never();
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product("not-an-id").await,
            Err(ProductError::InvalidId { .. })
        ));
        assert!(matches!(
            service.delete_product("42").await,
            Err(ProductError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let id = Uuid::now_v7();
        let err = service
            .update_product(
                &id.to_string(),
                UpdateProduct {
                    price: Some(5.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_validates_present_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(
                &Uuid::now_v7().to_string(),
                UpdateProduct {
                    price: Some(0.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(ProductError::Database("connection reset".to_string())));

        let service = ProductService::new(mock_repo);
        let err = service
            .delete_product(&Uuid::now_v7().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }
}
