//! Product schema checks
//!
//! Both entry points report every violated constraint at once, one entry per
//! field, ordered by field name.

use validator::{Validate, ValidationErrors};

use crate::error::{FieldViolation, ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, UpdateProduct};

/// Check a create request and apply defaults (`inStock = true`, `tags = []`).
pub fn validate_create(input: CreateProduct) -> ProductResult<NewProduct> {
    input.validate().map_err(into_product_error)?;

    match input {
        CreateProduct {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            category: Some(category),
            in_stock,
            tags,
        } => Ok(NewProduct {
            name,
            description,
            price,
            category,
            in_stock: in_stock.unwrap_or(true),
            tags: tags.unwrap_or_default(),
        }),
        // `required` rules above reject every other shape
        _ => Err(ProductError::Validation(vec![FieldViolation::new(
            "product",
            "Required fields are missing",
        )])),
    }
}

/// Check the fields present in an update request.
pub fn validate_update(input: UpdateProduct) -> ProductResult<UpdateProduct> {
    input.validate().map_err(into_product_error)?;
    Ok(input)
}

fn into_product_error(errors: ValidationErrors) -> ProductError {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            let first = errors.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some(FieldViolation::new(field.to_string(), message))
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    ProductError::Validation(violations)
}
