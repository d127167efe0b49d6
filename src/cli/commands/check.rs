//! `check`: parse and verify a document, report every problem.

use serde_json::{Value, json};

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::cli::commands::{read_input, resolve_config};
use crate::error::Docs2SchemaError;
use crate::schema::{SchemaDocument, SchemaError};

/// Runs a collect-all-errors conversion and prints a report to stdout.
///
/// # Errors
///
/// Returns the schema error when the document has problems, after the
/// report has been printed, so the exit code reflects the failure kind.
pub fn run(args: &CheckArgs) -> Result<(), Docs2SchemaError> {
    let mut config = resolve_config(&args.policy)?;
    config.collect_errors = true;

    let input = read_input(args.input.as_deref())?;
    let result = config.generator().generate(input.split_inclusive('\n'));

    match args.format {
        OutputFormat::Human => print_human(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report(&result))?),
    }

    result.map(|_| ()).map_err(Into::into)
}

fn print_human(result: &Result<SchemaDocument, SchemaError>) {
    match result {
        Ok(document) => {
            let definitions = &document.definitions;
            println!(
                "OK: {} definitions, {} distinct references",
                definitions.len(),
                definitions.references().len()
            );
        }
        Err(error) => {
            let messages = error.messages();
            for message in &messages {
                println!("ERROR: {message}");
            }
            println!("{} error(s) found", messages.len());
        }
    }
}

fn report(result: &Result<SchemaDocument, SchemaError>) -> Value {
    match result {
        Ok(document) => json!({
            "valid": true,
            "definitions": document.definitions.len(),
            "references": document.definitions.references().len(),
            "errors": [],
        }),
        Err(SchemaError::Translation(errors)) => {
            let errors: Vec<Value> = errors
                .iter()
                .flat_map(|definition| {
                    definition.failures.iter().map(|failure| {
                        json!({
                            "kind": "translation",
                            "definition": definition.object,
                            "property": failure.property,
                            "type": failure.error.input,
                            "message": failure.error.to_string(),
                        })
                    })
                })
                .collect();
            json!({ "valid": false, "errors": errors })
        }
        Err(SchemaError::UnresolvedReferences(errors)) => {
            let errors: Vec<Value> = errors
                .iter()
                .map(|error| {
                    json!({
                        "kind": "unresolved_reference",
                        "name": error.name,
                        "suggestion": error.suggestion,
                        "message": error.to_string(),
                    })
                })
                .collect();
            json!({ "valid": false, "errors": errors })
        }
    }
}
