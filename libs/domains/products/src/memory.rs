//! In-memory implementation of ProductRepository
//!
//! Keeps products in insertion order, which stands in for MongoDB's natural
//! order when no sort is requested. The handler tests run against it in place
//! of MongoDB.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::filter::{PriceSort, ProductFilter};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products.write().await.push(product.clone());
        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        // stable, so equal prices keep insertion order
        match filter.sort {
            Some(PriceSort::PriceAsc) => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(PriceSort::PriceDesc) => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
            None => {}
        }

        let offset = usize::try_from(filter.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.pagination.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply_update(changes);
        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = products.remove(index);
        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Pagination, PriceRange};

    fn new_product(name: &str, category: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            category: category.to_string(),
            in_stock: true,
            tags: vec![],
        }
    }

    async fn seeded(prices: &[f64]) -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for (i, price) in prices.iter().enumerate() {
            repo.create(new_product(&format!("p{}", i), "misc", *price))
                .await
                .unwrap();
        }
        repo
    }

    fn prices(products: &[Product]) -> Vec<f64> {
        products.iter().map(|p| p.price).collect()
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order_without_sort() {
        let repo = seeded(&[30.0, 10.0, 20.0]).await;
        let found = repo.find(ProductFilter::default()).await.unwrap();
        assert_eq!(prices(&found), vec![30.0, 10.0, 20.0]);
    }

    #[tokio::test]
    async fn test_find_sorts_by_price() {
        let repo = seeded(&[30.0, 10.0, 20.0]).await;

        let asc = ProductFilter {
            sort: Some(PriceSort::PriceAsc),
            ..Default::default()
        };
        assert_eq!(prices(&repo.find(asc).await.unwrap()), vec![10.0, 20.0, 30.0]);

        let desc = ProductFilter {
            sort: Some(PriceSort::PriceDesc),
            ..Default::default()
        };
        assert_eq!(prices(&repo.find(desc).await.unwrap()), vec![30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn test_find_applies_range_then_pagination() {
        let repo = seeded(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).await;
        let filter = ProductFilter {
            price: PriceRange {
                min: Some(2.0),
                max: Some(5.0),
            },
            pagination: Pagination { page: 2, limit: 3 },
            ..Default::default()
        };
        assert_eq!(prices(&repo.find(filter).await.unwrap()), vec![5.0]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = seeded(&[1.0, 2.0]).await;
        let filter = ProductFilter {
            pagination: Pagination { page: 5, limit: 10 },
            ..Default::default()
        };
        assert!(repo.find(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let repo = seeded(&[1.0]).await;
        let missing = Uuid::now_v7();
        assert!(repo
            .update(missing, UpdateProduct::default())
            .await
            .unwrap()
            .is_none());
        assert!(repo.delete(missing).await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(new_product("a", "misc", 3.0)).await.unwrap();

        let removed = repo.delete(created.id).await.unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }
}
