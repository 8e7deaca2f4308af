//! Introspectable item schema (JSON Schema draft-04 shaped).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::ViewContext;
use crate::model::PluginStatus;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
}

/// Constraints and documentation for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub description: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<&'static str>>,
    pub context: Vec<ViewContext>,
    pub readonly: bool,
}

impl FieldSchema {
    fn read_only(field_type: FieldType, description: &'static str) -> Self {
        Self {
            description,
            field_type,
            format: None,
            allowed: None,
            context: vec![ViewContext::View],
            readonly: true,
        }
    }

    fn uri(mut self) -> Self {
        self.format = Some("uri");
        self
    }

    fn one_of(mut self, values: Vec<&'static str>) -> Self {
        self.allowed = Some(values);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSchema {
    #[serde(rename = "$schema")]
    pub dialect: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: BTreeMap<&'static str, FieldSchema>,
}

impl ItemSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.properties.get(name)
    }
}

/// Schema of the public plugin representation.
pub fn plugin_schema() -> ItemSchema {
    let properties = BTreeMap::from([
        (
            "id",
            FieldSchema::read_only(
                FieldType::String,
                "A unique alphanumeric identifier for the object.",
            ),
        ),
        ("name", FieldSchema::read_only(FieldType::String, "The name of the object.")),
        (
            "description",
            FieldSchema::read_only(FieldType::String, "The description of the object."),
        ),
        (
            "version",
            FieldSchema::read_only(FieldType::String, "The version of the object (free-form)."),
        ),
        (
            "link",
            FieldSchema::read_only(FieldType::String, "URL to the website of the object.").uri(),
        ),
        (
            "author",
            FieldSchema::read_only(FieldType::String, "The name of the author(s) of the object."),
        ),
        (
            "author-url",
            FieldSchema::read_only(FieldType::String, "URL to the author(s) of the object.").uri(),
        ),
        (
            "textdomain",
            FieldSchema::read_only(
                FieldType::String,
                "The name of the gettext text domain for the object, used for translations.",
            ),
        ),
        (
            "textdomain-path",
            FieldSchema::read_only(
                FieldType::String,
                "The relative path to the location containing the gettext translation files for the object.",
            ),
        ),
        (
            "network-only",
            FieldSchema::read_only(
                FieldType::Boolean,
                "Whether the object can only be activated on a per-network basis.",
            ),
        ),
        (
            "status",
            FieldSchema::read_only(FieldType::String, "A named status for the object.")
                .one_of(PluginStatus::ALL.map(PluginStatus::as_str).to_vec()),
        ),
    ]);

    ItemSchema {
        dialect: "http://json-schema.org/draft-04/schema#",
        title: "plugin",
        kind: "object",
        properties,
    }
}
