use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};
use serde_json::{Value, json};

use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Json<Value> {
    let resolved = authz::resolve_principal(&principal);
    let can_view_plugins =
        authz::authorize_plugin_read(services.guard(), services.deployment(), &principal).is_ok();

    Json(json!({
        "principal_id": principal.principal_id().to_string(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "capabilities": resolved.permissions.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        "deployment": services.deployment(),
        "can_view_plugins": can_view_plugins,
    }))
}
