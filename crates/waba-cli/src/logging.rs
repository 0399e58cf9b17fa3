//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `waba-core` and
//! `waba-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level | Targets shown |
//! |----------|--------------|---------------|
//! | (none)   | WARN         | no            |
//! | `-v`     | INFO         | no            |
//! | `-vv`    | DEBUG        | yes           |
//! | `-vvv`   | TRACE        | yes           |
//! | `--quiet`| ERROR        | no            |
//!
//! `RUST_LOG` overrides the level if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events pass the default filter. `waba` is the binary and
/// also the target used by the service logger and the HTTP client.
const TARGETS: [&str; 3] = ["waba", "waba_core", "waba_adapters"];

/// Subscriber settings resolved from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: &'static str,
    ansi: bool,
    /// Show which crate emitted an event; only useful while debugging.
    show_target: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_tty: bool) -> Self {
        let level = derive_level(args);
        Self {
            level,
            ansi: !args.no_color && stderr_is_tty,
            show_target: matches!(level, "debug" | "trace"),
        }
    }

    fn directives(&self) -> String {
        TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(settings.show_target)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn verbosity_maps_to_level() {
        let cases = [
            (0, false, "warn"),
            (1, false, "info"),
            (2, false, "debug"),
            (3, false, "trace"),
            (10, false, "trace"),
            // quiet takes precedence over verbose
            (0, true, "error"),
            (3, true, "error"),
        ];
        for (verbose, quiet, expected) in cases {
            assert_eq!(
                derive_level(&args_with(verbose, quiet)),
                expected,
                "verbose={verbose} quiet={quiet}"
            );
        }
    }

    #[test]
    fn targets_only_shown_when_debugging() {
        assert!(!LogSettings::from_args(&args_with(1, false), false).show_target);
        assert!(LogSettings::from_args(&args_with(2, false), false).show_target);
    }

    #[test]
    fn ansi_needs_tty_and_color() {
        let mut args = args_with(0, false);
        assert!(LogSettings::from_args(&args, true).ansi);
        assert!(!LogSettings::from_args(&args, false).ansi);

        args.no_color = true;
        assert!(!LogSettings::from_args(&args, true).ansi);
    }

    #[test]
    fn directives_cover_every_crate() {
        let settings = LogSettings::from_args(&args_with(2, false), false);
        assert_eq!(
            settings.directives(),
            "waba=debug,waba_core=debug,waba_adapters=debug"
        );
    }
}
