use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Path, Query,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde_json::Value;

use plugboard_core::PluginId;

use crate::app::dto::{self, ListQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) = query?;
    let context = query.context()?;
    services.list_plugins(&principal, context).map(Json)
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    id: Result<Path<String>, PathRejection>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let context = query.context()?;
    let id: PluginId = id.parse().map_err(|e: plugboard_core::DomainError| {
        ApiError::InvalidParam {
            param: "plugin",
            message: e.to_string(),
        }
    })?;

    services.get_plugin(&principal, &id, context).map(Json)
}

pub async fn describe(Extension(services): Extension<Arc<AppServices>>) -> Json<Value> {
    Json(dto::route_description(services.schema(), services.links()))
}
