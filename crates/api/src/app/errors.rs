use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use plugboard_auth::AuthzError;
use plugboard_catalog::InventoryError;

/// Every failure a handler can return, mapped to one wire format:
/// `{ code, message, data: { status, .. } }`.
#[derive(Debug)]
pub enum ApiError {
    /// No or invalid credentials.
    NotLoggedIn(String),
    /// Authenticated, but the access guard denied the request.
    Forbidden(AuthzError),
    InvalidParam { param: &'static str, message: String },
    PluginNotFound,
    /// No route matches the path.
    NoRoute,
    /// The path exists but not for this method.
    MethodNotAllowed,
    Inventory(InventoryError),
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        ApiError::Forbidden(err)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        ApiError::Inventory(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParam {
            param: "context",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidParam {
            param: "plugin",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotLoggedIn(msg) => {
                json_error(StatusCode::UNAUTHORIZED, "rest_not_logged_in", msg)
            }
            ApiError::Forbidden(err) => {
                let mut data = Map::new();
                data.insert(
                    "missing_capability".into(),
                    Value::String(err.missing_permission().to_string()),
                );
                json_error_with_data(
                    StatusCode::FORBIDDEN,
                    "rest_forbidden",
                    "Sorry, you are not allowed to manage plugins.",
                    data,
                )
            }
            ApiError::InvalidParam { param, message } => {
                let mut data = Map::new();
                data.insert("params".into(), json!({ param: message }));
                json_error_with_data(
                    StatusCode::BAD_REQUEST,
                    "rest_invalid_param",
                    format!("Invalid parameter(s): {param}"),
                    data,
                )
            }
            ApiError::PluginNotFound => {
                json_error(StatusCode::NOT_FOUND, "rest_plugin_invalid_id", "Invalid plugin id.")
            }
            ApiError::NoRoute => json_error(
                StatusCode::NOT_FOUND,
                "rest_no_route",
                "No route was found matching the URL.",
            ),
            ApiError::MethodNotAllowed => json_error(
                StatusCode::METHOD_NOT_ALLOWED,
                "rest_no_route",
                "No route was found matching the URL and request method.",
            ),
            ApiError::Inventory(err) => json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "rest_inventory_unavailable",
                err.to_string(),
            ),
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    json_error_with_data(status, code, message, Map::new())
}

pub fn json_error_with_data(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    mut data: Map<String, Value>,
) -> Response {
    data.insert("status".into(), json!(status.as_u16()));
    (
        status,
        axum::Json(json!({
            "code": code,
            "message": message.into(),
            "data": data,
        })),
    )
        .into_response()
}
