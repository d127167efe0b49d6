//! Type-string translation.
//!
//! Reference docs describe each property's type with a short, loosely
//! structured notation (`int`, `\[ string \]`, `[OutboundObject](#outboundobject)`,
//! `"tcp" | "udp"`, ...). [`TypeTranslator::translate`] turns one such
//! notation into a [`SchemaFragment`].
//!
//! Rules are tried in a fixed order and the first match wins. Several of them
//! are prefix/suffix tests over overlapping shapes, so the order is part of
//! the contract. Anything no rule recognizes is a [`TranslationError`]; the
//! notation has to be taught to the translator rather than approximated.

use std::collections::HashSet;

use crate::schema::error::TranslationError;
use crate::schema::fragment::{PrimitiveType, SchemaFragment};

/// Reference names that are documented but never defined as a section.
///
/// They are emitted as plain objects: a single dangling `$ref` makes editors
/// flag the root schema and stop showing inline diagnostics altogether.
pub const DEFAULT_KNOWN_UNRESOLVABLE: &[&str] = &[
    "FakeDnsObject",
    "metricsObject",
    "TransportObject",
    "noiseObject",
    "DnsServerObject",
];

/// Inline badge markup stripped before translation.
pub const DEFAULT_BADGES: &[&str] = &[
    r#"<Badge text="WIP" type="warning"/>"#,
    r#"<Badge text="BETA" type="warning"/>"#,
];

/// Exact notations translated to `{"type": "boolean"}`.
///
/// `"true | false"` is matched whole, before the union rule. Without this
/// entry it falls through to the union rule and becomes
/// `{"anyOf": [{"type": "boolean"}, {"type": "boolean"}]}`.
pub const DEFAULT_BOOLEAN_LITERALS: &[&str] = &["true", "false", "true | false", "bool"];

/// Translates type notations into schema fragments.
///
/// The translator is immutable once built; translating the same string twice
/// always yields the same fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTranslator {
    badges: Vec<String>,
    boolean_literals: Vec<String>,
    known_unresolvable: HashSet<String>,
}

impl Default for TypeTranslator {
    fn default() -> Self {
        Self::new(
            DEFAULT_BADGES.iter().copied(),
            DEFAULT_BOOLEAN_LITERALS.iter().copied(),
            DEFAULT_KNOWN_UNRESOLVABLE.iter().copied(),
        )
    }
}

impl TypeTranslator {
    /// Creates a translator with explicit badge markup, boolean tokens and
    /// allow-listed reference names.
    pub fn new<B, L, K>(badges: B, boolean_literals: L, known_unresolvable: K) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
        K: IntoIterator,
        K::Item: Into<String>,
    {
        Self {
            badges: badges.into_iter().map(Into::into).collect(),
            boolean_literals: boolean_literals.into_iter().map(Into::into).collect(),
            known_unresolvable: known_unresolvable.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `name` is emitted as an opaque object instead of a
    /// reference.
    #[must_use]
    pub fn is_known_unresolvable(&self, name: &str) -> bool {
        self.known_unresolvable.contains(name)
    }

    /// Translates one type notation.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] carrying the offending (cleaned) notation
    /// when neither the string nor one of its nested parts matches a rule.
    pub fn translate(&self, type_string: &str) -> Result<SchemaFragment, TranslationError> {
        let cleaned = self.strip_badges(type_string);
        let input = cleaned.trim();

        if input.is_empty() {
            return Ok(SchemaFragment::Any);
        }

        if let Some(inner) = input.strip_prefix(r"\[").and_then(|s| s.strip_suffix(r"\]")) {
            return Ok(SchemaFragment::array(self.translate(inner)?));
        }

        if let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Ok(SchemaFragment::array(self.translate(inner)?));
        }

        if (input.starts_with('[') && input.ends_with(')')) || input.ends_with("Object") {
            return Ok(self.named(reference_name(input)));
        }

        if self.boolean_literals.iter().any(|literal| literal == input) {
            return Ok(SchemaFragment::Type(PrimitiveType::Boolean));
        }

        if input.contains(" | ") {
            return input
                .split(" | ")
                .map(|alternative| self.translate(alternative))
                .collect::<Result<Vec<_>, _>>()
                .map(SchemaFragment::AnyOf);
        }

        match input {
            "address" | "address_port" | "CIDR" | "string" => {
                return Ok(SchemaFragment::Type(PrimitiveType::String));
            }
            "number" => return Ok(SchemaFragment::Type(PrimitiveType::Number)),
            "int" => return Ok(SchemaFragment::Type(PrimitiveType::Integer)),
            _ => {}
        }

        if input.starts_with("map") {
            return Ok(SchemaFragment::Type(PrimitiveType::Object));
        }

        if input.starts_with('"') && input.ends_with('"') {
            // A lone `"` is both the opening and the closing quote.
            let value = input.get(1..input.len() - 1).unwrap_or_default();
            return Ok(SchemaFragment::Const(value.to_string()));
        }

        if input.starts_with("a list of") {
            return Ok(SchemaFragment::Any);
        }

        if input == "string array" {
            return Ok(SchemaFragment::array(SchemaFragment::Type(
                PrimitiveType::String,
            )));
        }

        if input.starts_with("string, any of") {
            return Ok(SchemaFragment::Type(PrimitiveType::String));
        }

        Err(TranslationError::new(input))
    }

    fn named(&self, name: &str) -> SchemaFragment {
        if self.is_known_unresolvable(name) {
            tracing::debug!(name, "allow-listed reference emitted as object");
            SchemaFragment::Type(PrimitiveType::Object)
        } else {
            SchemaFragment::reference(name)
        }
    }

    fn strip_badges(&self, type_string: &str) -> String {
        self.badges
            .iter()
            .filter(|badge| !badge.is_empty())
            .fold(type_string.to_string(), |acc, badge| acc.replace(badge.as_str(), ""))
    }
}

/// Extracts the definition name from `[Name](url)` or a bare `NameObject`.
///
/// Everything up to the first `]` is taken, then surrounding brackets are
/// dropped.
fn reference_name(input: &str) -> &str {
    input
        .split_once(']')
        .map_or(input, |(head, _)| head)
        .trim_matches(['[', ']'])
}
