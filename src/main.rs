//! `docs2schema`: configuration reference markdown to JSON Schema

use clap::Parser;

use docs2schema::cli::args::Cli;
use docs2schema::cli::commands;
use docs2schema::error::ExitCode;
use docs2schema::observability::{LogSettings, init_logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            std::process::exit(code);
        }
    };

    init_logging(&LogSettings::new(
        cli.log_format,
        cli.verbose,
        cli.quiet,
        cli.color,
    ));

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
