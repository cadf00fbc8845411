//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - the document store failed or rejected the id",
    content_type = "application/json",
    example = json!({
        "message": "Invalid product id 'abc': invalid length: expected length 32 for simple format, found 3"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "message": "Product validation failed: name: Name is required, price: Price must be greater than 0"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed query parameters",
    content_type = "application/json",
    example = json!({
        "message": "minPrice must be a number, got 'cheap'"
    })
)]
pub struct BadRequestQueryResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "Product 0192f0c4-8f1e-7a51-b3a4-3c1d2e5f6a7b not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
