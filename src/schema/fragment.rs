//! JSON Schema fragments produced by the type translator.
//!
//! A [`SchemaFragment`] is one node of the emitted schema. It is kept as a
//! typed enum rather than a raw `serde_json::Value` so that references can be
//! collected after the fact by walking the tree, instead of being recorded
//! into shared state while translating.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Prefix used for every `$ref` emitted into the document.
pub const DEFINITIONS_POINTER: &str = "#/definitions/";

/// Primitive JSON Schema `type` keywords the translator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `"object"`
    Object,
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"integer"`
    Integer,
    /// `"boolean"`
    Boolean,
}

impl PrimitiveType {
    /// Returns the JSON Schema keyword for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the generated schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaFragment {
    /// `{}`: accepts anything.
    Any,
    /// `{"type": ...}` for a primitive type.
    Type(PrimitiveType),
    /// `{"type": "array", "items": ...}`
    Array(Box<Self>),
    /// `{"$ref": "#/definitions/<name>"}`
    Reference(String),
    /// `{"anyOf": [...]}`
    AnyOf(Vec<Self>),
    /// `{"const": ...}`
    Const(String),
}

impl SchemaFragment {
    /// Builds an array fragment with the given item schema.
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::Array(Box::new(items))
    }

    /// Builds a reference to a named definition.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Returns every definition name referenced by this fragment, in
    /// post-order (nested items before later siblings).
    ///
    /// Duplicates are kept; callers that need a set dedupe themselves.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    /// Appends referenced definition names to `out`.
    pub fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Reference(name) => out.push(name),
            Self::Array(items) => items.collect_references(out),
            Self::AnyOf(variants) => {
                for variant in variants {
                    variant.collect_references(out);
                }
            }
            Self::Any | Self::Type(_) | Self::Const(_) => {}
        }
    }

    /// Converts the fragment into a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which does not happen for
    /// the shapes this enum can hold.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_map(Some(0))?.end(),
            Self::Type(ty) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", ty.as_str())?;
                map.end()
            }
            Self::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            Self::Reference(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$ref", &format!("{DEFINITIONS_POINTER}{name}"))?;
                map.end()
            }
            Self::AnyOf(variants) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("anyOf", variants)?;
                map.end()
            }
            Self::Const(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("const", value)?;
                map.end()
            }
        }
    }
}
