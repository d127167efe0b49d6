//! Markdown reference to JSON Schema conversion.
//!
//! The pipeline is a single pass:
//!
//! 1. [`section::Sections`] groups lines into sections and properties,
//!    translating each property's type string with
//!    [`translate::TypeTranslator`] as it is declared.
//! 2. [`assemble::Definitions`] folds the finished definitions by title,
//!    merging repeated titles into `anyOf`.
//! 3. References are cross-checked and the [`assemble::SchemaDocument`] is
//!    built around the root definition.

pub mod assemble;
pub mod definition;
pub mod error;
pub mod fragment;
pub mod section;
pub mod translate;

pub use assemble::{Definitions, SchemaDocument};
pub use definition::{Definition, DescriptionOptions, PropertySchema};
pub use error::{DefinitionError, SchemaError, TranslationError, UnresolvedReferenceError};
pub use fragment::{PrimitiveType, SchemaFragment};
pub use section::{BlankLines, SectionOptions, Sections};
pub use translate::TypeTranslator;

use crate::schema::assemble::DEFAULT_ROOT_DEFINITION;

/// Runs the full conversion with a fixed policy.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Type-string translator.
    pub translator: TypeTranslator,
    /// Section parser settings.
    pub sections: SectionOptions,
    /// Cross-check every `$ref` against the defined titles.
    pub verify_references: bool,
    /// Keep parsing after a translation failure and report all of them.
    pub collect_errors: bool,
    /// Title targeted by the document's root `$ref`.
    pub root_definition: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            translator: TypeTranslator::default(),
            sections: SectionOptions::default(),
            verify_references: true,
            collect_errors: false,
            root_definition: DEFAULT_ROOT_DEFINITION.to_string(),
        }
    }
}

impl Generator {
    /// Converts `lines` into a schema document.
    ///
    /// Each line should carry its own terminator so descriptions keep their
    /// original line breaks; `str::split_inclusive('\n')` does this.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::Translation`] for untranslatable type notations: the
    ///   first failing section, or every one when `collect_errors` is set.
    /// - [`SchemaError::UnresolvedReferences`] for references to undefined
    ///   titles, when `verify_references` is set.
    pub fn generate<I, S>(&self, lines: I) -> Result<SchemaDocument, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut definitions = Definitions::new();
        let mut failures = Vec::new();

        for result in Sections::new(lines, &self.translator, self.sections) {
            match result {
                Ok(definition) => definitions.insert(definition),
                Err(error) if self.collect_errors => {
                    tracing::error!(%error, "translation failed");
                    failures.push(error);
                }
                Err(error) => return Err(SchemaError::Translation(vec![error])),
            }
        }

        if !failures.is_empty() {
            return Err(SchemaError::Translation(failures));
        }

        if self.verify_references {
            let resolved = definitions
                .verify_references()
                .map_err(SchemaError::UnresolvedReferences)?;
            tracing::debug!(resolved, "references verified");
        }

        if !definitions.contains(&self.root_definition) {
            tracing::warn!(
                root = %self.root_definition,
                "root definition not found; the document's $ref will dangle"
            );
        }

        tracing::info!(definitions = definitions.len(), "schema assembled");
        Ok(SchemaDocument::new(definitions, &self.root_definition))
    }
}
