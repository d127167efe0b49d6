//! Generator configuration.
//!
//! Every parsing policy that differs between documentation sources is a
//! field here rather than a hard-coded choice. Values come from, in order of
//! increasing precedence: built-in defaults, an optional YAML file, then
//! command-line flags.
//!
//! ```yaml
//! blank_lines: skip
//! suppress_code_block_descriptions: true
//! known_unresolvable:
//!   - FakeDnsObject
//!   - metricsObject
//! ```

pub mod loader;

pub use loader::{load_config, load_config_with_limit, max_config_size};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::schema::assemble::DEFAULT_ROOT_DEFINITION;
use crate::schema::translate::{DEFAULT_BADGES, DEFAULT_BOOLEAN_LITERALS, DEFAULT_KNOWN_UNRESOLVABLE};
use crate::schema::{BlankLines, DescriptionOptions, Generator, SectionOptions, TypeTranslator};

/// Complete generator policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Whitespace-only line handling.
    pub blank_lines: BlankLines,

    /// Emit descriptions that open with a code fence as empty strings.
    pub suppress_code_block_descriptions: bool,

    /// Duplicate descriptions into `markdownDescription`.
    pub markdown_description: bool,

    /// Fail when a `$ref` names an undefined title.
    pub verify_references: bool,

    /// Report every translation failure instead of stopping at the first.
    pub collect_errors: bool,

    /// Reference names emitted as plain objects and never verified.
    pub known_unresolvable: Vec<String>,

    /// Inline markup removed from type strings before translation.
    pub badges: Vec<String>,

    /// Exact notations that translate to a boolean.
    pub boolean_literals: Vec<String>,

    /// Title of the definition targeted by the root `$ref`.
    pub root_definition: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            blank_lines: BlankLines::default(),
            suppress_code_block_descriptions: false,
            markdown_description: true,
            verify_references: true,
            collect_errors: false,
            known_unresolvable: to_strings(DEFAULT_KNOWN_UNRESOLVABLE),
            badges: to_strings(DEFAULT_BADGES),
            boolean_literals: to_strings(DEFAULT_BOOLEAN_LITERALS),
            root_definition: DEFAULT_ROOT_DEFINITION.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_definition.trim().is_empty() {
            return Err(invalid("root_definition", "", "a non-empty definition title"));
        }

        let lists = [
            ("known_unresolvable", &self.known_unresolvable),
            ("badges", &self.badges),
            ("boolean_literals", &self.boolean_literals),
        ];
        for (field, values) in lists {
            if let Some(value) = values.iter().find(|v| v.trim().is_empty()) {
                return Err(invalid(field, value, "non-blank entries"));
            }
        }

        Ok(())
    }

    /// Adds names to the allow-list, skipping ones already present.
    pub fn allow_unresolved<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.known_unresolvable.contains(&name) {
                self.known_unresolvable.push(name);
            }
        }
    }

    /// Builds the type translator for this policy.
    #[must_use]
    pub fn translator(&self) -> TypeTranslator {
        TypeTranslator::new(
            self.badges.iter().cloned(),
            self.boolean_literals.iter().cloned(),
            self.known_unresolvable.iter().cloned(),
        )
    }

    /// Builds the section parser settings for this policy.
    #[must_use]
    pub const fn section_options(&self) -> SectionOptions {
        SectionOptions {
            blank_lines: self.blank_lines,
            descriptions: DescriptionOptions {
                suppress_code_blocks: self.suppress_code_block_descriptions,
                markdown_description: self.markdown_description,
            },
        }
    }

    /// Builds a ready-to-run generator.
    #[must_use]
    pub fn generator(&self) -> Generator {
        Generator {
            translator: self.translator(),
            sections: self.section_options(),
            verify_references: self.verify_references,
            collect_errors: self.collect_errors,
            root_definition: self.root_definition.clone(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn invalid(field: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
