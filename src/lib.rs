//! `docs2schema` - configuration reference markdown to JSON Schema
//!
//! Parses the section/property notation used by configuration reference
//! docs and emits a draft-07 JSON Schema with one definition per documented
//! object, suitable for editor validation and autocomplete.
//!
//! ```
//! use docs2schema::schema::Generator;
//!
//! let markdown = "## Foo\nA foo.\n> bar: int\n";
//! let document = Generator::default()
//!     .generate(markdown.split_inclusive('\n'))
//!     .unwrap();
//! let value = serde_json::to_value(&document).unwrap();
//! assert_eq!(value["definitions"]["Foo"]["properties"]["bar"]["type"], "integer");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod schema;
