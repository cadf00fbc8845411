//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes mounted under the API prefix
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{create_router, health_router};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // Nothing listens on port 1, so every store call fails fast
    const UNREACHABLE: &str = "mongodb://127.0.0.1:1/shop?serverSelectionTimeoutMS=200";

    async fn app() -> Router {
        let config = Config {
            app: app_info!(),
            mongodb: MongoConfig::new(UNREACHABLE),
            server: ServerConfig::default(),
            environment: Environment::Development,
        };
        let mongo_client = mongodb::Client::with_uri_str(UNREACHABLE).await.unwrap();
        let state = AppState::new(config, mongo_client);

        temp_env::with_var("CORS_ALLOWED_ORIGIN", None::<&str>, || {
            create_router::<ApiDoc>(routes(&state), &state.config.server.api_prefix)
        })
        .unwrap()
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_health_is_outside_prefix() {
        let (status, body) = get(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "products_api");
    }

    #[tokio::test]
    async fn test_ready_without_database_is_503() {
        let (status, body) = get(app().await, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_store_failure_is_500_with_message() {
        let (status, body) = get(app().await, "/api/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_message() {
        let (status, body) = get(app().await, "/api/orders").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let (status, body) = get(app().await, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/products").is_some());
        assert!(body["paths"].get("/api/products/{id}").is_some());
    }
}
