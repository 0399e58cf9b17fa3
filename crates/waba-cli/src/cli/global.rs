//! Flags accepted by every subcommand.
//!
//! Flattened into [`super::Cli`]. The API credentials are grouped under
//! their own help heading; each of them also reads an environment variable
//! and overrides the matching `[api]` config key.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Logging verbosity, `-v` to `-vvv`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (one line per API operation)
    -vv     - Debug level (request paths, response statuses)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only command results and errors are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// An explicit file must exist; the default location is optional.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "WABA_CONFIG",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// `auto` picks `human` on a terminal and `plain` otherwise.
    #[arg(
        long = "output-format",
        global = true,
        value_name = "FORMAT",
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,

    /// Sending phone number id; overrides `api.phone_number_id`.
    #[arg(
        long = "phone-number-id",
        global = true,
        value_name = "ID",
        env = "WABA_PHONE_NUMBER_ID",
        help_heading = "API",
        help = "Business phone number id"
    )]
    pub phone_number_id: Option<String>,

    /// Graph API access token; overrides `api.access_token`.
    #[arg(
        long = "access-token",
        global = true,
        value_name = "TOKEN",
        env = "WABA_ACCESS_TOKEN",
        help_heading = "API",
        hide_env_values = true,
        help = "Graph API access token"
    )]
    pub access_token: Option<String>,
}

/// How command results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured, with spinners.
    Human,
    Plain,
    /// Raw API objects; errors become a JSON document on stderr.
    Json,
}
