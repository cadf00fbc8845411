//! `/products` routes backed by MongoDB

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductService};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(ProductService::new(MongoProductRepository::new(&state.db)))
}

/// Create the `products` collection indexes; safe to repeat on every start
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    info!(database = state.db.name(), "Product indexes ready");
    Ok(())
}
