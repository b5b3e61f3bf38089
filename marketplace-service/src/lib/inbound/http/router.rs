use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::products;
use super::handlers::sessions;
use super::handlers::system;
use super::handlers::vendors;
use super::middleware::require_identity;
use crate::domain::health::HealthProbe;
use crate::identity::ports::SessionServicePort;
use crate::product::ports::ProductServicePort;
use crate::vendor::ports::VendorServicePort;

#[derive(Clone)]
pub struct AppState {
    pub app_name: Arc<str>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub vendor_service: Arc<dyn VendorServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub health_probe: Arc<dyn HealthProbe>,
}

/// CORS policy: permissive unless origins are listed.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/api/ping", get(system::ping))
        .route("/api/health", get(system::health))
        .route("/api/info", get(system::info))
        .route("/api/auth/login", post(sessions::login))
        .route("/api/auth/refresh", post(sessions::refresh))
        .route("/api/auth/verify", post(sessions::verify))
        .route(
            "/api/vendors",
            get(vendors::list_vendors).post(vendors::create_vendor),
        )
        .route(
            "/api/vendors/:vendor_id",
            get(vendors::get_vendor)
                .patch(vendors::update_vendor)
                .delete(vendors::delete_vendor),
        )
        .route("/api/products", get(products::list_products))
        .route(
            "/api/products/:product_id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        );

    let protected_routes = Router::new()
        .route("/api/products", post(products::create_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use auth::PasswordHasher;
    use auth::TokenLifetimes;
    use axum::http::header::AUTHORIZATION;
    use axum::http::Method;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::identity::service::SessionService;
    use crate::outbound::health::StaticHealthProbe;
    use crate::product::service::ProductService;
    use crate::repositories::InMemoryIdentityRepository;
    use crate::repositories::InMemoryProductRepository;
    use crate::repositories::InMemoryVendorRepository;
    use crate::vendor::service::VendorService;

    fn test_router() -> Router {
        let authenticator = Arc::new(Authenticator::new(
            "router-test-secret",
            PasswordHasher::with_cost(4),
            TokenLifetimes::default(),
        ));
        let vendors = Arc::new(InMemoryVendorRepository::new());
        let products = Arc::new(InMemoryProductRepository::new(Arc::clone(&vendors)));

        let state = AppState {
            app_name: "B2Bmarket".into(),
            session_service: Arc::new(SessionService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                authenticator,
            )),
            vendor_service: Arc::new(VendorService::new(Arc::clone(&vendors))),
            product_service: Arc::new(ProductService::new(products, vendors)),
            health_probe: Arc::new(StaticHealthProbe),
        };

        create_router(state, &[])
    }

    fn request(method: Method, uri: &str) -> axum::http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    #[tokio::test]
    async fn test_public_routes_skip_bearer_check() {
        let response = test_router()
            .oneshot(request(Method::GET, "/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_creation_requires_bearer() {
        let response = test_router()
            .oneshot(
                request(Method::POST, "/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Widget","price":"1.00"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = test_router()
            .oneshot(
                request(Method::POST, "/api/products")
                    .header(AUTHORIZATION, "Basic abc")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Widget","price":"1.00"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(request(Method::GET, "/api/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
