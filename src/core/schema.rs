//! Declarative description of the object a model is asked to produce.
//!
//! An [`ObjectSchema`] names the expected output and carries its shape as a
//! [`SchemaType`] tree. The tree lowers to plain JSON Schema through
//! [`ObjectSchema::to_value`] and is handed to the provider opaquely; this
//! crate never validates values against it, the provider enforces it during
//! generation.
//!
//! Schemas can be hand-built with the [`SchemaType`] constructors, derived
//! from a Rust type via [`schemars`], or supplied as raw JSON Schema.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

// ============================================================================
// Section: field types
// ============================================================================

/// The shape of a single schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    /// A string restricted to a fixed set of values.
    Enumeration(Vec<String>),
    Array(Box<SchemaType>),
    /// Named fields, all of them required.
    Object(Vec<(String, SchemaType)>),
    /// Pre-lowered JSON Schema, passed through untouched.
    Raw(Value),
}

/// A schema node plus an optional hint for the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaType {
    kind: SchemaKind,
    description: Option<String>,
}

impl SchemaType {
    fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enumeration(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn array(items: SchemaType) -> Self {
        Self::new(SchemaKind::Array(Box::new(items)))
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaType)>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Object(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn raw(value: Value) -> Self {
        Self::new(SchemaKind::Raw(value))
    }

    /// Attaches a hint describing the field to the model.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lowers this node to JSON Schema.
    pub fn to_value(&self) -> Value {
        let mut schema = match &self.kind {
            SchemaKind::String => json!({ "type": "string" }),
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::Integer => json!({ "type": "integer" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Enumeration(values) => json!({ "type": "string", "enum": values }),
            SchemaKind::Array(items) => json!({ "type": "array", "items": items.to_value() }),
            SchemaKind::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for (name, field) in fields {
                    properties.insert(name.clone(), field.to_value());
                    required.push(Value::String(name.clone()));
                }
                // strict structured output rejects open-ended objects
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                })
            }
            SchemaKind::Raw(value) => value.clone(),
        };

        if let Some(description) = &self.description
            && let Value::Object(map) = &mut schema
        {
            map.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }

        schema
    }
}

// ============================================================================
// Section: object schema
// ============================================================================

/// A named schema for one generated object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Identifier reported to the provider.
    pub name: String,
    /// Optional summary of what the object represents.
    pub description: Option<String>,
    root: SchemaType,
}

impl ObjectSchema {
    /// Builds an object schema from named fields, all required.
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaType)>,
        S: Into<String>,
    {
        Self {
            name: "response".to_string(),
            description: None,
            root: SchemaType::object(fields),
        }
    }

    /// Derives the schema from a Rust type implementing
    /// [`schemars::JsonSchema`]. The type's title and doc comment become
    /// the schema name and description when present.
    pub fn from_type<T: JsonSchema>() -> Self {
        let value = schema_for!(T).to_value();
        let name = value
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("response")
            .to_string();
        let description = value
            .get("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self {
            name,
            description,
            root: SchemaType::raw(value),
        }
    }

    /// Wraps an already-lowered JSON Schema value.
    pub fn raw(value: Value) -> Self {
        Self {
            name: "response".to_string(),
            description: None,
            root: SchemaType::raw(value),
        }
    }

    /// Overrides the reported schema name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches a summary of the object for the model.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lowers the whole schema to JSON Schema.
    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }
}
