//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::filter::{PriceSort, ProductFilter};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// Stored shape of a product: the API's `id` lives in `_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductDocument {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: p.category,
            in_stock: p.in_stock,
            tags: p.tags,
            created_at: p.created_at,
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(d: ProductDocument) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            price: d.price,
            category: d.category,
            in_stock: d.in_stock,
            tags: d.tags,
            created_at: d.created_at,
        }
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the indexes backing the list query
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<ProductDocument> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// `{category: <c>, price: {$gte: <min>, $lte: <max>}}`, each part only when set
    pub fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        if !filter.price.is_unbounded() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.price.min {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.price.max {
                price_filter.insert("$lte", max);
            }
            doc.insert("price", price_filter);
        }

        doc
    }

    pub fn build_find_options(filter: &ProductFilter) -> FindOptions {
        let sort = filter.sort.map(|sort| match sort {
            PriceSort::PriceAsc => doc! { "price": 1 },
            PriceSort::PriceDesc => doc! { "price": -1 },
        });

        FindOptions::builder()
            .sort(sort)
            .skip(filter.pagination.offset().min(i64::MAX as u64))
            .limit(i64::try_from(filter.pagination.limit).unwrap_or(i64::MAX))
            .build()
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection
            .insert_one(ProductDocument::from(product.clone()))
            .await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mongo_filter = Self::build_filter(&filter);
        let options = Self::build_find_options(&filter);

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let document = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>> {
        let filter = Self::id_filter(id);
        let Some(existing) = self.collection.find_one(filter.clone()).await? else {
            return Ok(None);
        };

        let mut updated = Product::from(existing);
        updated.apply_update(changes);

        let result = self
            .collection
            .replace_one(filter, ProductDocument::from(updated.clone()))
            .await?;
        if result.matched_count == 0 {
            // deleted between the read and the write
            return Ok(None);
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted.map(Product::from))
    }
}
