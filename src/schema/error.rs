//! Error types for schema generation.
//!
//! Both failure kinds are fatal for a run: a type notation the translator
//! does not understand, and a `$ref` naming a definition that was never
//! declared. They are plain values so a caller can gather every failure
//! before giving up.

use std::fmt;

use thiserror::Error;

/// A type string that matched none of the translation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized type notation \"{input}\"")]
pub struct TranslationError {
    /// The offending notation, after badge stripping and trimming.
    pub input: String,
}

impl TranslationError {
    /// Creates a new translation error for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// A single property whose type string failed to translate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("property '{property}': {error}")]
pub struct PropertyFailure {
    /// Property name as declared.
    pub property: String,
    /// The raw type string from the declaration line.
    pub type_string: String,
    /// The underlying translation failure.
    #[source]
    pub error: TranslationError,
}

/// A section whose properties could not all be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    /// Title of the section.
    pub object: String,
    /// Every failing property, in declaration order.
    pub failures: Vec<PropertyFailure>,
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in definition '{}': ", self.object)?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DefinitionError {}

/// A referenced definition name that does not exist in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReferenceError {
    /// The referenced name.
    pub name: String,
    /// Closest existing definition title, if one is near enough.
    pub suggestion: Option<String>,
}

impl fmt::Display for UnresolvedReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot resolve definition '{}'", self.name)?;
        match &self.suggestion {
            Some(suggestion) => write!(f, " (did you mean '{suggestion}'?)"),
            None => f.write_str(" (add it to known_unresolvable?)"),
        }
    }
}

impl std::error::Error for UnresolvedReferenceError {}

/// Aggregate failure of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// One or more sections contained untranslatable type notations.
    #[error("{}", summarize(.0, "definitions failed to translate"))]
    Translation(Vec<DefinitionError>),

    /// One or more references point at undefined definitions.
    #[error("{}", summarize(.0, "references could not be resolved"))]
    UnresolvedReferences(Vec<UnresolvedReferenceError>),
}

impl SchemaError {
    /// Returns one human-readable line per underlying failure.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Translation(errors) => errors.iter().map(ToString::to_string).collect(),
            Self::UnresolvedReferences(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

fn summarize<T: fmt::Display>(items: &[T], what: &str) -> String {
    match items {
        [] => format!("0 {what}"),
        [only] => only.to_string(),
        [first, ..] => format!("{} {what}; first: {first}", items.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(property: &str, input: &str) -> PropertyFailure {
        PropertyFailure {
            property: property.to_string(),
            type_string: input.to_string(),
            error: TranslationError::new(input),
        }
    }

    #[test]
    fn translation_error_display_quotes_input() {
        let err = TranslationError::new("weird thing");
        assert_eq!(err.to_string(), "unrecognized type notation \"weird thing\"");
    }

    #[test]
    fn definition_error_lists_all_properties() {
        let err = DefinitionError {
            object: "Foo".to_string(),
            failures: vec![failure("a", "x"), failure("b", "y")],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("in definition 'Foo': "));
        assert!(msg.contains("property 'a'"));
        assert!(msg.contains("property 'b'"));
    }

    #[test]
    fn unresolved_reference_with_suggestion() {
        let err = UnresolvedReferenceError {
            name: "OutboundObjet".to_string(),
            suggestion: Some("OutboundObject".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve definition 'OutboundObjet' (did you mean 'OutboundObject'?)"
        );
    }

    #[test]
    fn unresolved_reference_without_suggestion_hints_allow_list() {
        let err = UnresolvedReferenceError {
            name: "Zzz".to_string(),
            suggestion: None,
        };
        assert!(err.to_string().contains("known_unresolvable"));
    }

    #[test]
    fn single_failure_summary_is_the_failure_itself() {
        let inner = UnresolvedReferenceError {
            name: "A".to_string(),
            suggestion: None,
        };
        let err = SchemaError::UnresolvedReferences(vec![inner.clone()]);
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn multiple_failures_summary_counts() {
        let err = SchemaError::UnresolvedReferences(vec![
            UnresolvedReferenceError {
                name: "A".to_string(),
                suggestion: None,
            },
            UnresolvedReferenceError {
                name: "B".to_string(),
                suggestion: None,
            },
        ]);
        assert!(err.to_string().starts_with("2 references could not be resolved"));
        assert_eq!(err.messages().len(), 2);
    }
}
