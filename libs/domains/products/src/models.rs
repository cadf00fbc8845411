use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// At least 1
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub tags: Vec<String>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a product
///
/// Every field is optional at the type level so that a missing field is a
/// validation failure with a readable message rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[schema(required = true, example = "Mechanical keyboard")]
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    #[schema(required = true, example = "Hot-swappable, 87 keys")]
    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub description: Option<String>,

    #[schema(required = true, minimum = 1, example = 89.99)]
    #[validate(
        required(message = "Price is required"),
        range(min = 1.0, message = "Price must be greater than 0")
    )]
    pub price: Option<f64>,

    #[schema(required = true, example = "electronics")]
    #[validate(
        required(message = "Category is required"),
        length(min = 1, message = "Category is required")
    )]
    pub category: Option<String>,

    /// Defaults to `true`
    pub in_stock: Option<bool>,

    /// Defaults to `[]`
    pub tags: Option<Vec<String>>,
}

/// Request body for updating a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[schema(minimum = 1)]
    #[validate(range(min = 1.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// A create request that passed validation, defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub tags: Vec<String>,
}

/// Response body for a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedProduct {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
    pub product: Product,
}

impl DeletedProduct {
    pub fn new(product: Product) -> Self {
        Self {
            message: "Product deleted successfully".to_string(),
            product,
        }
    }
}

impl Product {
    /// Assign an id and creation time to a validated product
    pub fn new(input: NewProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
            tags: input.tags,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields present in `update`. `id` and `created_at` never change.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }
}
