use serde::Deserialize;
use serde_json::{Value, json};

use plugboard_catalog::{ItemSchema, ShapedPlugin, ViewContext};

use crate::app::errors::ApiError;
use crate::app::links::LinkBuilder;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub context: Option<String>,
}

impl ListQuery {
    /// Requested context, `view` when absent.
    pub fn context(&self) -> Result<ViewContext, ApiError> {
        match self.context.as_deref() {
            None => Ok(ViewContext::default()),
            Some(raw) => raw.parse().map_err(|e: plugboard_core::DomainError| {
                ApiError::InvalidParam {
                    param: "context",
                    message: e.to_string(),
                }
            }),
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

/// One shaped plugin with its navigational links.
pub fn plugin_to_json(plugin: ShapedPlugin, links: &LinkBuilder) -> Value {
    let self_href = links.item(plugin.id.as_str());
    let mut fields = plugin.fields;
    fields.insert(
        "_links".into(),
        json!({
            "self": [{ "href": self_href }],
            "collection": [{ "href": links.collection() }],
        }),
    );
    Value::Object(fields)
}

/// Route description served by `OPTIONS /plugins`.
pub fn route_description(schema: &ItemSchema, links: &LinkBuilder) -> Value {
    json!({
        "namespace": "plugboard/v1",
        "methods": ["GET"],
        "endpoints": [{
            "methods": ["GET"],
            "args": {
                "context": {
                    "description": "Scope under which the request is made; determines fields present in response.",
                    "type": "string",
                    "enum": ViewContext::ALL.map(|c| c.as_str()),
                    "default": ViewContext::default().as_str(),
                    "required": false,
                }
            }
        }],
        "schema": schema,
        "_links": {
            "self": [{ "href": links.collection() }],
        },
    })
}
