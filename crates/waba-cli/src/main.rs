//! # waba CLI
//!
//! Send WhatsApp Business message templates and manage the template
//! catalogue from the terminal.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env + flags).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                    |
//! |------|----------------------------|
//! |  0   | Success                    |
//! |  1   | Internal / system error    |
//! |  2   | User / input error         |
//! |  3   | Template not found         |
//! |  4   | Configuration error        |
//! |  5   | Request rejected by the API |

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; real deployments export variables directly.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too; clap picks the exit code.
            let _ = e.print();
            return ExitCode::from(e.exit_code().clamp(0, 255) as u8);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            let json = cli.global.output_format == OutputFormat::Json;
            return handle_error(e, verbose, json);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let json = output.is_json();

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output).await {
        Ok(()) => {
            info!("waba completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, json),
    }
}

/// `init` and `completions` must work before any config file exists.
fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    match cli.command {
        Commands::Init(_) | Commands::Completions(_) => {
            let mut config = AppConfig::default();
            config.apply_overrides(&cli.global);
            Ok(config)
        }
        _ => Ok(AppConfig::load(&cli.global)?),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
async fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::Send(cmd) => commands::send::execute(cmd, config, output).await,
        Commands::List(cmd) => commands::list::execute(cmd, config, output).await,
        Commands::Show(cmd) => commands::show::execute(cmd, config, output).await,
        Commands::Create(cmd) => commands::create::execute(cmd, config, output).await,
        Commands::Delete(cmd) => commands::delete::execute(cmd, config, output).await,
        Commands::Init(cmd) => commands::init::execute(cmd, &active_path(&global), output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, config, &active_path(&global), output)
        }
    }
}

fn active_path(global: &GlobalArgs) -> std::path::PathBuf {
    AppConfig::active_path(global)
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// Errors always go to stderr so piped stdout stays clean.
fn handle_error(err: CliError, verbose: bool, json: bool) -> ExitCode {
    err.log();

    let msg = if json {
        format!("{}\n", err.to_json())
    } else if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn init_does_not_read_config_file() {
        let cli = Cli::parse_from(["waba", "--config", "/nonexistent/waba.toml", "init"]);
        assert!(load_config(&cli).is_ok());
    }

    #[test]
    fn other_commands_require_explicit_file() {
        let cli = Cli::parse_from(["waba", "--config", "/nonexistent/waba.toml", "list"]);
        let err = load_config(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
