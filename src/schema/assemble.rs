//! Folding definitions into the final schema document.

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::definition::Definition;
use crate::schema::error::UnresolvedReferenceError;
use crate::schema::fragment::DEFINITIONS_POINTER;

/// `$schema` URI of the emitted document.
pub const SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Title of the definition describing the top-level configuration object.
pub const DEFAULT_ROOT_DEFINITION: &str = "Basic Configuration Modules";

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// All definitions sharing one title.
///
/// A single definition serializes as itself; repeated titles serialize as
/// `{"anyOf": [...]}` over every variant in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    variants: Vec<Definition>,
}

impl DefinitionEntry {
    fn new(definition: Definition) -> Self {
        Self {
            variants: vec![definition],
        }
    }

    /// The definitions merged under this title.
    #[must_use]
    pub fn variants(&self) -> &[Definition] {
        &self.variants
    }

    /// Returns `true` if the title appeared more than once.
    #[must_use]
    pub fn is_union(&self) -> bool {
        self.variants.len() > 1
    }
}

impl Serialize for DefinitionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.variants.as_slice() {
            [single] => single.serialize(serializer),
            variants => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("anyOf", variants)?;
                map.end()
            }
        }
    }
}

/// Title-keyed definitions in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Definitions {
    entries: IndexMap<String, DefinitionEntry>,
}

impl Definitions {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, merging it into an `anyOf` if its title exists.
    pub fn insert(&mut self, definition: Definition) {
        match self.entries.entry(definition.title.clone()) {
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                entry.variants.push(definition);
                tracing::debug!(
                    title = %slot.key(),
                    variants = slot.get().variants.len(),
                    "merged duplicate title"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(DefinitionEntry::new(definition));
            }
        }
    }

    /// Looks up the entry for `title`.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&DefinitionEntry> {
        self.entries.get(title)
    }

    /// Returns `true` if a definition titled `title` exists.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Number of distinct titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Titles in output order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every distinct referenced name, in first-use order.
    #[must_use]
    pub fn references(&self) -> IndexSet<&str> {
        self.entries
            .values()
            .flat_map(|entry| entry.variants.iter())
            .flat_map(Definition::references)
            .collect()
    }

    /// Checks that every referenced name is defined.
    ///
    /// # Errors
    ///
    /// Returns one [`UnresolvedReferenceError`] per missing name, each with
    /// the closest existing title as a suggestion when one is close enough.
    pub fn verify_references(&self) -> Result<usize, Vec<UnresolvedReferenceError>> {
        let references = self.references();
        let missing: Vec<_> = references
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| UnresolvedReferenceError {
                name: (*name).to_string(),
                suggestion: self.suggest(name),
            })
            .collect();

        if missing.is_empty() {
            Ok(references.len())
        } else {
            Err(missing)
        }
    }

    /// Closest existing title to `name`, within a small edit distance.
    #[must_use]
    pub fn suggest(&self, name: &str) -> Option<String> {
        self.titles()
            .map(|title| (title, strsim::damerau_levenshtein(name, title)))
            .filter(|(_, distance)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(_, distance)| *distance)
            .map(|(title, _)| title.to_string())
    }
}

impl FromIterator<Definition> for Definitions {
    fn from_iter<T: IntoIterator<Item = Definition>>(iter: T) -> Self {
        let mut definitions = Self::new();
        for definition in iter {
            definitions.insert(definition);
        }
        definitions
    }
}

/// The emitted JSON Schema document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaDocument {
    /// JSON Schema dialect.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Pointer to the root definition.
    #[serde(rename = "$ref")]
    pub root: String,
    /// Every parsed definition.
    pub definitions: Definitions,
}

impl SchemaDocument {
    /// Wraps `definitions` with a root reference to `root_definition`.
    #[must_use]
    pub fn new(definitions: Definitions, root_definition: &str) -> Self {
        Self {
            schema: SCHEMA_DRAFT_07.to_string(),
            root: format!("{DEFINITIONS_POINTER}{root_definition}"),
            definitions,
        }
    }

    /// Renders the document as 2-space indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns a serialization error from `serde_json`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}
