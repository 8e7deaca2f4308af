//! Response shaping by request context.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use plugboard_core::{DomainError, PluginId};

use crate::model::Plugin;
use crate::schema::ItemSchema;

/// Response-shaping mode. Only the read-only full projection exists.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewContext {
    #[default]
    View,
}

impl ViewContext {
    pub const ALL: [ViewContext; 1] = [ViewContext::View];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewContext::View => "view",
        }
    }
}

impl core::fmt::Display for ViewContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewContext {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(ViewContext::View),
            other => Err(DomainError::validation(format!(
                "context is not one of {}: '{other}'",
                ViewContext::ALL.map(|c| c.as_str()).join(", ")
            ))),
        }
    }
}

/// A plugin reduced to the fields visible in one context.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedPlugin {
    pub id: PluginId,
    pub fields: Map<String, Value>,
}

/// Keep only the fields the schema marks visible in `context`.
///
/// Fields the schema does not describe are passed through.
pub fn shape(plugin: &Plugin, context: ViewContext, schema: &ItemSchema) -> ShapedPlugin {
    let mut fields = match serde_json::to_value(plugin) {
        Ok(Value::Object(map)) => map,
        // Plugin is a plain struct of strings and bools.
        _ => Map::new(),
    };

    fields.retain(|name, _| {
        schema
            .field(name)
            .is_none_or(|field| field.context.contains(&context))
    });

    ShapedPlugin {
        id: plugin.id.clone(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::plugin_schema;

    fn plugin() -> Plugin {
        Plugin {
            id: PluginId::new("hello.php"),
            name: "Hello Dolly".into(),
            description: "Lyrics".into(),
            version: "1.6".into(),
            link: String::new(),
            author: "Matt".into(),
            author_url: String::new(),
            textdomain: String::new(),
            textdomain_path: String::new(),
            network_only: false,
            status: None,
        }
    }

    #[test]
    fn parses_view_only() {
        assert_eq!("view".parse::<ViewContext>().unwrap(), ViewContext::View);
        let err = "edit".parse::<ViewContext>().unwrap_err();
        assert!(err.to_string().contains("'edit'"));
    }

    #[test]
    fn view_keeps_every_field() {
        let shaped = shape(&plugin(), ViewContext::View, &plugin_schema());
        assert_eq!(shaped.fields.len(), 11);
        assert_eq!(shaped.fields["name"], "Hello Dolly");
        assert_eq!(shaped.id.as_str(), "hello.php");
    }

    #[test]
    fn hides_fields_outside_context() {
        let mut schema = plugin_schema();
        if let Some(field) = schema.properties.get_mut("author") {
            field.context.clear();
        }

        let shaped = shape(&plugin(), ViewContext::View, &schema);
        assert!(!shaped.fields.contains_key("author"));
        assert!(shaped.fields.contains_key("name"));
    }
}
