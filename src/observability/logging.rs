//! Diagnostic logging for `docs2schema`.
//!
//! Stdout is reserved for the schema or the `check` report, so every event
//! goes to stderr. [`LogSettings`] gathers the global CLI flags that shape
//! the output; [`init_logging`] installs the matching subscriber.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::cli::args::ColorChoice;

/// Environment variable holding a filter directive that replaces `-v`.
pub const LOG_LEVEL_ENV: &str = "DOCS2SCHEMA_LOG_LEVEL";

/// How events are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// One readable line per event.
    #[default]
    Human,
    /// One JSON object per event.
    Json,
}

/// Filter directive for a `-v` count: warnings only by default, then info,
/// debug, and trace for three or more.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolved logging flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Rendering of each event.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `--quiet`: nothing is logged, whatever the environment says.
    pub quiet: bool,
    /// Emit ANSI escapes (human format only).
    pub ansi: bool,
}

impl LogSettings {
    /// Resolves the global CLI flags, deciding colour against stderr.
    #[must_use]
    pub fn new(format: LogFormat, verbosity: u8, quiet: bool, color: ColorChoice) -> Self {
        let ansi = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        Self {
            format,
            verbosity,
            quiet,
            ansi,
        }
    }

    /// The filter directive in effect given an optional environment override.
    fn directive(&self, env_override: Option<&str>) -> String {
        if self.quiet {
            return "off".to_string();
        }
        match env_override.map(str::trim) {
            Some(directive) if !directive.is_empty() => directive.to_string(),
            _ => verbosity_to_directive(self.verbosity).to_string(),
        }
    }

    fn filter(&self, env_override: Option<&str>) -> EnvFilter {
        EnvFilter::try_new(self.directive(env_override))
            .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(self.verbosity)))
    }

    /// Builds a subscriber writing to `writer`.
    fn subscriber<W>(
        &self,
        env_override: Option<&str>,
        writer: W,
    ) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter(env_override))
            .with_target(self.verbosity >= 2)
            .with_writer(writer);

        match self.format {
            LogFormat::Human => Box::new(builder.with_ansi(self.ansi).finish()),
            LogFormat::Json => Box::new(builder.json().finish()),
        }
    }
}

/// Installs the global subscriber on stderr.
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(settings: &LogSettings) {
    let env_override = std::env::var(LOG_LEVEL_ENV).ok();
    let subscriber = settings.subscriber(env_override.as_deref(), std::io::stderr);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Self;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    fn settings(format: LogFormat, verbosity: u8, quiet: bool) -> LogSettings {
        LogSettings {
            format,
            verbosity,
            quiet,
            ansi: false,
        }
    }

    fn capture(settings: LogSettings, env_override: Option<&str>) -> String {
        let out = Captured::default();
        let subscriber = settings.subscriber(env_override, out.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(root = "Missing", "root definition not found");
            tracing::info!(definitions = 3, "schema assembled");
            tracing::debug!(title = "Foo", "definition parsed");
        });
        out.text()
    }

    #[test]
    fn default_run_shows_only_warnings() {
        let text = capture(settings(LogFormat::Human, 0, false), None);
        assert!(text.contains("root definition not found"));
        assert!(!text.contains("schema assembled"));
    }

    #[test]
    fn each_v_opens_one_more_level() {
        let info = capture(settings(LogFormat::Human, 1, false), None);
        assert!(info.contains("schema assembled"));
        assert!(!info.contains("definition parsed"));

        let debug = capture(settings(LogFormat::Human, 2, false), None);
        assert!(debug.contains("definition parsed"));
        assert_eq!(verbosity_to_directive(200), "trace");
    }

    #[test]
    fn quiet_wins_over_environment() {
        let text = capture(settings(LogFormat::Human, 3, true), Some("trace"));
        assert!(text.is_empty(), "{text}");
    }

    #[test]
    fn environment_replaces_verbosity() {
        let text = capture(settings(LogFormat::Human, 0, false), Some("debug"));
        assert!(text.contains("definition parsed"));
    }

    #[test]
    fn bad_environment_directive_falls_back() {
        let text = capture(settings(LogFormat::Human, 1, false), Some("docs2schema=loud"));
        assert!(text.contains("schema assembled"));
        assert!(!text.contains("definition parsed"));
    }

    #[test]
    fn json_events_are_one_object_per_line() {
        let text = capture(settings(LogFormat::Json, 1, false), None);
        let events: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["fields"]["definitions"], 3);
    }

    #[test]
    fn explicit_color_choice_is_respected() {
        assert!(LogSettings::new(LogFormat::Human, 0, false, ColorChoice::Always).ansi);
        assert!(!LogSettings::new(LogFormat::Human, 0, false, ColorChoice::Never).ansi);
    }
}
