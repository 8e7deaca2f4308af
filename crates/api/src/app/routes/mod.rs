use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::app::errors::ApiError;
use crate::middleware::{AuthState, auth_middleware};

pub mod plugins;
pub mod system;

/// All endpoints. Authentication is layered per method, so unknown methods
/// still get a 405 and `OPTIONS /plugins` stays public.
pub fn router(auth: AuthState) -> Router {
    let authed = from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route("/health", get(system::health))
        .route(
            "/whoami",
            get(system::whoami)
                .route_layer(authed.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/plugins",
            get(plugins::list)
                .route_layer(authed.clone())
                .options(plugins::describe)
                .fallback(method_not_allowed),
        )
        .route(
            "/plugins/*id",
            get(plugins::get_one)
                .route_layer(authed.clone())
                .fallback(method_not_allowed),
        )
        .fallback(no_route)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn no_route() -> ApiError {
    ApiError::NoRoute
}
