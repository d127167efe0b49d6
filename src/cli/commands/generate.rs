//! `generate`: markdown in, JSON Schema out.

use crate::cli::args::GenerateArgs;
use crate::cli::commands::{read_input, resolve_config, write_output};
use crate::error::Docs2SchemaError;

/// Runs the conversion and writes the schema document.
///
/// Nothing is written when generation fails, so a partially valid schema
/// never reaches `--output`.
///
/// # Errors
///
/// Returns configuration, I/O, translation or reference errors.
pub fn run(args: &GenerateArgs) -> Result<(), Docs2SchemaError> {
    let mut config = resolve_config(&args.policy)?;
    config.collect_errors |= args.collect_errors;

    let input = read_input(args.input.as_deref())?;
    let document = match config.generator().generate(input.split_inclusive('\n')) {
        Ok(document) => document,
        Err(error) => {
            let messages = error.messages();
            if messages.len() > 1 {
                for message in &messages {
                    eprintln!("ERROR: {message}");
                }
            }
            return Err(error.into());
        }
    };

    let json = document.to_json_pretty()?;
    write_output(args.output.as_deref(), &json)?;

    if let Some(path) = &args.output {
        tracing::info!(
            path = %path.display(),
            definitions = document.definitions.len(),
            "schema written"
        );
    }
    Ok(())
}
