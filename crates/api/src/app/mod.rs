//! HTTP application wiring (axum router + services).
//!
//! - `services.rs`: inventory, assembler and guard wiring
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: query parsing and JSON mapping
//! - `links.rs`: absolute link construction
//! - `errors.rs`: the shared error body

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod links;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (used by `main.rs` and the black-box tests).
pub fn build_app(services: AppServices, jwt_secret: &str) -> Router {
    let jwt = Arc::new(plugboard_auth::Hs256JwtValidator::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt };

    routes::router(auth_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Extension(Arc::new(services))),
    )
}
