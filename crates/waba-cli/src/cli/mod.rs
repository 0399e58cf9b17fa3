//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "waba",
    bin_name = "waba",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "WhatsApp Business message templates from the terminal",
    long_about = "waba sends approved message templates and manages the \
                  template catalogue of a WhatsApp Business account.",
    after_help = "EXAMPLES:\n\
        \x20 waba send 15551234567 order_ready --body-param 42\n\
        \x20 waba list --limit 50\n\
        \x20 waba create spring_sale --category marketing --components body.json\n\
        \x20 waba completions bash > /usr/share/bash-completion/completions/waba",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a template message.
    #[command(
        about = "Send a template message",
        after_help = "EXAMPLES:\n\
            \x20 waba send 15551234567 hello_world\n\
            \x20 waba send 15551234567 order_ready --body-param Ada --body-param 42\n\
            \x20 waba send 15551234567 promo --lang pt_BR --header-param 'Spring sale'"
    )]
    Send(SendArgs),

    /// List templates of the account.
    #[command(
        visible_alias = "ls",
        about = "List templates",
        after_help = "EXAMPLES:\n\
            \x20 waba list\n\
            \x20 waba list --limit 100 --format json"
    )]
    List(ListArgs),

    /// Show one template.
    #[command(about = "Show template details")]
    Show(ShowArgs),

    /// Submit a new template for review.
    #[command(
        about = "Create a template",
        after_help = "EXAMPLES:\n\
            \x20 waba create order_ready --category utility --components components.json\n\
            \x20 cat components.json | waba create order_ready --category utility --components -"
    )]
    Create(CreateArgs),

    /// Delete a template.
    #[command(visible_alias = "rm", about = "Delete a template")]
    Delete(DeleteArgs),

    /// Initialise a waba configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 waba init                       # default location\n\
            \x20 waba init --config ./waba.toml  # explicit path\n\
            \x20 waba init --force               # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 waba completions bash > ~/.local/share/bash-completion/completions/waba\n\
            \x20 waba completions zsh  > ~/.zfunc/_waba\n\
            \x20 waba completions fish > ~/.config/fish/completions/waba.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the waba configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 waba config get api.phone_number_id\n\
            \x20 waba config list\n\
            \x20 waba config path"
    )]
    Config(ConfigCommands),
}

// ── send ──────────────────────────────────────────────────────────────────────

/// Arguments for `waba send`.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Recipient phone number in international format.
    #[arg(value_name = "TO", help = "Recipient phone number")]
    pub to: String,

    /// Approved template name.
    #[arg(value_name = "TEMPLATE", help = "Template name")]
    pub template: String,

    /// Template language; defaults to `defaults.language`.
    #[arg(short = 'l', long = "lang", value_name = "CODE", help = "Language code (e.g. en_US)")]
    pub language: Option<String>,

    /// Body placeholder values, in order.
    #[arg(
        short = 'b',
        long = "body-param",
        value_name = "TEXT",
        help = "Body parameter (repeatable, in placeholder order)"
    )]
    pub body_params: Vec<String>,

    /// Header placeholder value.
    #[arg(long = "header-param", value_name = "TEXT", help = "Header text parameter")]
    pub header_param: Option<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `waba list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum number of templates; defaults to `defaults.list_limit`.
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum number of templates"
    )]
    pub limit: Option<u32>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `waba show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Template name.
    #[arg(value_name = "NAME")]
    pub name: String,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `waba create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Template name (lowercase, underscores).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Template category.
    #[arg(long = "category", value_enum, help = "Template category")]
    pub category: Category,

    /// Template language; defaults to `defaults.language`.
    #[arg(short = 'l', long = "lang", value_name = "CODE", help = "Language code")]
    pub language: Option<String>,

    /// JSON array of component definitions, or `-` for stdin.
    #[arg(
        long = "components",
        value_name = "FILE",
        help = "JSON file with the components array ('-' reads stdin)"
    )]
    pub components: PathBuf,
}

/// Template categories accepted by `waba create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Category {
    Marketing,
    Utility,
    /// Also accepted as `auth`.
    #[value(alias = "auth")]
    Authentication,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marketing => write!(f, "marketing"),
            Self::Utility => write!(f, "utility"),
            Self::Authentication => write!(f, "authentication"),
        }
    }
}

// ── delete ────────────────────────────────────────────────────────────────────

/// Arguments for `waba delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Template name; every language version is removed.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Delete without asking")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `waba init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `waba completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `waba config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `api.api_version`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn category_display() {
        assert_eq!(Category::Marketing.to_string(), "marketing");
        assert_eq!(Category::Utility.to_string(), "utility");
        assert_eq!(Category::Authentication.to_string(), "authentication");
    }

    #[test]
    fn parse_send_command() {
        let cli = Cli::parse_from([
            "waba",
            "send",
            "15551234567",
            "order_ready",
            "--body-param",
            "Ada",
            "-b",
            "42",
            "--lang",
            "en_GB",
        ]);
        let Commands::Send(args) = cli.command else {
            panic!("expected Send command");
        };
        assert_eq!(args.to, "15551234567");
        assert_eq!(args.body_params, ["Ada", "42"]);
        assert_eq!(args.language.as_deref(), Some("en_GB"));
        assert!(args.header_param.is_none());
    }

    #[test]
    fn auth_alias() {
        let cli = Cli::parse_from([
            "waba", "create", "otp", "--category", "auth", "--components", "-",
        ]);
        if let Commands::Create(args) = cli.command {
            assert_eq!(args.category, Category::Authentication);
        } else {
            panic!("expected Create command");
        }
    }

    #[test]
    fn list_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["waba", "list", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["waba", "list", "--limit", "5"]).is_ok());
    }

    #[test]
    fn create_requires_category_and_components() {
        assert!(Cli::try_parse_from(["waba", "create", "x"]).is_err());
        assert!(Cli::try_parse_from(["waba", "create", "x", "--category", "utility"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["waba", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
