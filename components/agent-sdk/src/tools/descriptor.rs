//! Tool descriptors and the wire shapes exchanged with the tool host.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Primitive parameter types a tool may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free-form text.
    String,
    /// Base-10 signed integer.
    Integer,
    /// Floating-point number.
    Number,
    /// `true` or `false`.
    Boolean,
}

impl ParamType {
    /// Maps a JSON schema `type` keyword onto a primitive type.
    #[must_use]
    pub fn from_schema(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the schema keyword for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter of a tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    /// Parameter name as declared by the tool host.
    pub name: String,
    /// Declared primitive type.
    pub kind: ParamType,
}

/// Normalized schema and metadata for one callable tool.
///
/// Parameters keep the order in which the tool host declared them; positional
/// arguments bind against that order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    /// Unique tool name within a catalog.
    pub name: String,
    /// Ordered parameter list.
    pub parameters: Vec<ToolParameter>,
    /// Human-readable description.
    pub description: String,
}

impl ToolDescriptor {
    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Declared parameter names, in order.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }
}

/// Reads a string field, mapping any other JSON type to `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// A tool as advertised by the tool host, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name; hosts are expected to send one, but a missing or non-string name is tolerated.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Human-readable description.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// JSON schema describing the tool input.
    #[serde(default, rename = "inputSchema", alias = "input_schema")]
    pub input_schema: Value,
}

impl ToolSpec {
    /// Builds a spec whose schema declares the given properties in order.
    pub fn with_properties<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        properties: I,
    ) -> Self
    where
        I: IntoIterator<Item = (S, ParamType)>,
        S: Into<String>,
    {
        let mut props = Map::new();
        for (param, kind) in properties {
            let mut schema = Map::new();
            schema.insert("type".to_string(), Value::String(kind.as_str().to_string()));
            props.insert(param.into(), Value::Object(schema));
        }
        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(props));

        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            input_schema: Value::Object(schema),
        }
    }
}

/// Arguments bound to a tool's named parameters, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundArguments(Map<String, Value>);

impl BoundArguments {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Looks up a bound value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl fmt::Display for BoundArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// One content item of a tool result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Plain text content.
    Text {
        /// Text payload.
        text: String,
    },
    /// Any other content type (images, resources, ...).
    #[serde(other)]
    Unsupported,
}

impl ContentItem {
    /// Creates a text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns the text payload for text items.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Unsupported => None,
        }
    }
}

/// Result of a completed tool call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Content items returned by the tool.
    #[serde(default)]
    pub content: Vec<ContentItem>,
    /// Set by hosts that flag application-level failures.
    #[serde(default, rename = "isError", alias = "is_error")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful result with one text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
            is_error: false,
        }
    }
}
