use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "formcheck",
    version,
    about = "Validate clinical form schemas against a terminology service"
)]
pub struct Cli {
    /// Settings file (TOML, YAML or JSON).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate one or more form schema files.
    Validate(ValidateArgs),
    /// Print the effective rendering rules as YAML.
    Rules(RulesArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Form schema JSON files.
    #[arg(required = true)]
    pub schemas: Vec<PathBuf>,

    /// Rendering rules file (YAML, or JSON by extension).
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// REST root of the terminology service.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum lookups in flight per form.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Turn failed concept and answer lookups into errors.
    #[arg(long)]
    pub report_lookup_failures: bool,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
