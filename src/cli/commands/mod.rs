//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod completions;
pub mod generate;
pub mod version;

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::cli::args::{Cli, Commands, PolicyArgs};
use crate::config::{GeneratorConfig, load_config};
use crate::error::Docs2SchemaError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), Docs2SchemaError> {
    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Builds the effective configuration: file (if any), then flag overrides.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be loaded or the
/// resulting policy is invalid.
pub fn resolve_config(policy: &PolicyArgs) -> Result<GeneratorConfig, Docs2SchemaError> {
    let mut config = match &policy.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration");
            load_config(path)?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(blank_lines) = policy.blank_lines {
        config.blank_lines = blank_lines;
    }
    if policy.suppress_code_blocks {
        config.suppress_code_block_descriptions = true;
    }
    if policy.no_markdown_description {
        config.markdown_description = false;
    }
    if policy.no_verify_references {
        config.verify_references = false;
    }
    if let Some(root) = &policy.root_definition {
        config.root_definition.clone_from(root);
    }
    config.allow_unresolved(policy.allow_unresolved.iter().cloned());

    config.validate()?;
    Ok(config)
}

/// Reads the whole input document from `path`, or stdin when `None`.
fn read_input(path: Option<&Path>) -> Result<String, Docs2SchemaError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Docs2SchemaError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {e}", path.display()),
            ))
        }),
        None => {
            let mut text = String::new();
            std::io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Writes `contents` to `path`, or stdout when `None`.
fn write_output(path: Option<&Path>, contents: &str) -> Result<(), Docs2SchemaError> {
    match path {
        Some(path) => fs::write(path, contents).map_err(|e| {
            Docs2SchemaError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to write {}: {e}", path.display()),
            ))
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
