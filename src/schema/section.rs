//! Line-oriented section parser.
//!
//! The input is the narrow markdown dialect used by the configuration
//! reference:
//!
//! ```text
//! ## InboundObject            <- section header, starts a definition
//! Free text about the object. <- object description
//! > `port`: number            <- property declaration
//! Free text about the port.   <- property description
//! ```
//!
//! [`Sections`] wraps any iterator of lines and lazily yields one finished
//! definition per section. Lines keep their terminators so accumulated
//! descriptions reproduce the original line breaks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::schema::definition::{Definition, DescriptionOptions, RawObject, RawProperty};
use crate::schema::error::DefinitionError;
use crate::schema::translate::TypeTranslator;

/// Property name that is always dropped from the output.
pub const EXCLUDED_PROPERTY: &str = "Tony";

/// How whitespace-only lines inside a section are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BlankLines {
    /// Append them to the current description (paragraph breaks survive).
    #[default]
    Keep,
    /// Drop them as structural noise.
    Skip,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionOptions {
    /// Whitespace-only line policy.
    pub blank_lines: BlankLines,
    /// Description rendering applied when a section is finalized.
    pub descriptions: DescriptionOptions,
}

/// Lazy iterator of definitions parsed from a sequence of lines.
///
/// Lines before the first header are ignored. A section is finalized when
/// the next header arrives or the input ends.
#[derive(Debug)]
pub struct Sections<'t, I> {
    lines: I,
    translator: &'t TypeTranslator,
    options: SectionOptions,
    current: Option<RawObject>,
}

impl<'t, I, S> Sections<'t, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Creates a parser over `lines`.
    pub fn new(
        lines: impl IntoIterator<IntoIter = I>,
        translator: &'t TypeTranslator,
        options: SectionOptions,
    ) -> Self {
        Self {
            lines: lines.into_iter(),
            translator,
            options,
            current: None,
        }
    }

    /// Feeds one line, returning the previous section if `line` closed it.
    fn feed(&mut self, line: &str) -> Option<RawObject> {
        if line.starts_with("##") {
            let title = header_title(line);
            tracing::trace!(title, "section started");
            return self.current.replace(RawObject::new(title));
        }

        let current = self.current.as_mut()?;

        if let Some((name, type_string)) = property_declaration(line) {
            let name = name.trim_matches([' ', '`']);
            if name == EXCLUDED_PROPERTY {
                return None;
            }
            current.properties.push(RawProperty {
                name: name.to_string(),
                description: String::new(),
                type_string: type_string.trim_end_matches(['\r', '\n']).to_string(),
                schema: self.translator.translate(type_string),
            });
            return None;
        }

        if self.options.blank_lines == BlankLines::Skip && line.trim().is_empty() {
            return None;
        }

        current.append_description(line);
        None
    }

    fn finish(&self, object: RawObject) -> Result<Definition, DefinitionError> {
        let result = object.finalize(self.options.descriptions);
        if let Ok(definition) = &result {
            tracing::debug!(
                title = %definition.title,
                properties = definition.properties.len(),
                "definition parsed"
            );
        }
        result
    }
}

impl<I, S> Iterator for Sections<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Definition, DefinitionError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            if let Some(finished) = self.feed(line.as_ref()) {
                return Some(self.finish(finished));
            }
        }
        let last = self.current.take()?;
        Some(self.finish(last))
    }
}

/// Title of a header line: the text after its first space, trimmed.
fn header_title(line: &str) -> &str {
    line.split_once(' ').map_or(line, |(_, rest)| rest).trim()
}

/// Splits a `> name: type` line into its name and type parts.
fn property_declaration(line: &str) -> Option<(&str, &str)> {
    line.strip_prefix("> ")?.split_once(':')
}
