//! Raw section records and finished per-object definitions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::error::{DefinitionError, PropertyFailure, TranslationError};
use crate::schema::fragment::SchemaFragment;

/// Marker that opens a fenced code block.
pub const CODE_FENCE: &str = "```";

/// Controls how accumulated descriptions are rendered on finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionOptions {
    /// Emit descriptions starting with a code fence as empty strings.
    pub suppress_code_blocks: bool,
    /// Duplicate each description into `markdownDescription`.
    pub markdown_description: bool,
}

impl Default for DescriptionOptions {
    fn default() -> Self {
        Self {
            suppress_code_blocks: false,
            markdown_description: true,
        }
    }
}

impl DescriptionOptions {
    fn render(self, text: String) -> (String, Option<String>) {
        let text = if self.suppress_code_blocks && text.starts_with(CODE_FENCE) {
            String::new()
        } else {
            text
        };
        let markdown = self.markdown_description.then(|| text.clone());
        (text, markdown)
    }
}

/// A section being accumulated by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    /// Section title from the header line.
    pub title: String,
    /// Free text seen before the first property.
    pub description: String,
    /// Declared properties, in source order.
    pub properties: Vec<RawProperty>,
}

/// A property declaration being accumulated by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    /// Property name with spaces and backticks trimmed.
    pub name: String,
    /// Free text following the declaration line.
    pub description: String,
    /// Type notation as written.
    pub type_string: String,
    /// Translation of `type_string`, done when the property was declared.
    pub schema: Result<SchemaFragment, TranslationError>,
}

impl RawObject {
    /// Starts an empty section.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            properties: Vec::new(),
        }
    }

    /// Appends a free-text line to the last property, or to the object
    /// itself when no property has been declared yet.
    pub fn append_description(&mut self, line: &str) {
        match self.properties.last_mut() {
            Some(property) => property.description.push_str(line),
            None => self.description.push_str(line),
        }
    }

    /// Converts the accumulated section into a [`Definition`].
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] listing every property whose type
    /// string failed to translate.
    pub fn finalize(self, options: DescriptionOptions) -> Result<Definition, DefinitionError> {
        // Open objects have nothing to check unknown keys against.
        let additional_properties = self.properties.is_empty();

        let mut properties = IndexMap::with_capacity(self.properties.len());
        let mut failures = Vec::new();

        for raw in self.properties {
            match raw.schema {
                Ok(schema) => {
                    let (description, markdown_description) = options.render(raw.description);
                    properties.insert(
                        raw.name.clone(),
                        PropertySchema {
                            name: raw.name,
                            description,
                            markdown_description,
                            schema,
                        },
                    );
                }
                Err(error) => failures.push(PropertyFailure {
                    property: raw.name,
                    type_string: raw.type_string,
                    error,
                }),
            }
        }

        if !failures.is_empty() {
            return Err(DefinitionError {
                object: self.title,
                failures,
            });
        }

        let (description, markdown_description) = options.render(self.description);
        Ok(Definition {
            title: self.title,
            description,
            markdown_description,
            properties,
            additional_properties,
        })
    }
}

/// Schema of a single property: its documentation plus the translated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySchema {
    /// Property name.
    pub name: String,
    /// Plain description.
    pub description: String,
    /// Markdown copy of the description for editors that render it.
    #[serde(rename = "markdownDescription", skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// Translated type; its keys are merged into the property object.
    #[serde(flatten)]
    pub schema: SchemaFragment,
}

/// A finished object definition, keyed by title in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Section title.
    pub title: String,
    /// Section description.
    pub description: String,
    /// Markdown copy of the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    /// Properties in declaration order.
    pub properties: IndexMap<String, PropertySchema>,
    /// `false` once the object declares at least one property.
    pub additional_properties: bool,
}

impl Definition {
    /// Names referenced by any property of this definition, in order.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for property in self.properties.values() {
            property.schema.collect_references(&mut names);
        }
        names
    }
}
